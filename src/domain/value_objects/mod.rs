mod bucket_name;
mod object_key;
mod owner_id;

pub use bucket_name::BucketName;
pub use object_key::ObjectKey;
pub use owner_id::OwnerId;
