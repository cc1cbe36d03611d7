pub mod location;
pub mod slug;
