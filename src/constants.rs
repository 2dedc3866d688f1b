pub const ADMIN_USERNAME: &str = "admin";

pub mod auth {

    /// Password the seeded admin account starts with.
    pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

    /// Password every administratively created account starts with.
    /// Those accounts must change it on first login.
    pub const DEFAULT_USER_PASSWORD: &str = "welcome123";

    pub const MIN_PASSWORD_LENGTH: usize = 6;
}

pub mod intake {

    /// File extension for persisted item snapshots.
    pub const SNAPSHOT_EXTENSION: &str = "jpg";
}
