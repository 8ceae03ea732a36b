pub mod sharer_id;
pub mod uuid_path;
pub mod validated_json;

pub use sharer_id::{SHARER_USER_ID_HEADER, SharerId};
pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
