pub const LOCAL_STORAGE: &str = "local_storage";
pub const META: &str = "meta";
