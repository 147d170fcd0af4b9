pub mod common;

mod notification_sender;
