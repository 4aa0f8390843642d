pub const APP_NAME: &str = "lpg-connect";

pub mod ids {

    /// First id handed out by the volatile store.
    pub const FIRST_VOLATILE_APPLICATION_ID: i32 = 1001;
}

pub mod limits {

    pub const MOBILE_DIGITS: usize = 10;

    pub const USERNAME_MAX_LEN: usize = 50;
}

pub mod seed {

    pub const ADMIN_USERNAME: &str = "admin";

    pub const ADMIN_PASSWORD: &str = "admin123";

    pub const USER_USERNAME: &str = "user1";

    pub const USER_PASSWORD: &str = "user123";

    pub const SAMPLE_NAME: &str = "Priya Sharma";

    pub const SAMPLE_MOBILE: &str = "9876543210";

    pub const SAMPLE_ADDRESS: &str = "123, Main St.";

    pub const SAMPLE_CONNECTIONS: i32 = 2;
}
