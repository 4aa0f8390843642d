mod account;
mod applications;
mod session;
mod stats;

pub use account::{cmd_add_user, cmd_login, cmd_register, cmd_users};
pub use applications::{
    cmd_apply, cmd_delete_application, cmd_list_applications, cmd_my_applications,
    cmd_set_status, cmd_show_application,
};
pub use stats::{cmd_check, cmd_stats};
