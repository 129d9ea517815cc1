mod assistance;
mod complaint;
mod document;
mod event;
mod family;
mod forum;
mod notification;
mod resident;
mod rt;
mod user;
