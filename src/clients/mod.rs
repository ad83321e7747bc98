pub mod community_client;

pub use community_client::{CommunityPublisher, FirebaseClient};
