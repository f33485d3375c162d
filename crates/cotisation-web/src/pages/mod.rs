mod login;
mod manager;
mod member;
mod profile;

pub use login::LoginPage;
pub use manager::ManagerPage;
pub use member::MemberPage;
pub use profile::ProfilePage;
