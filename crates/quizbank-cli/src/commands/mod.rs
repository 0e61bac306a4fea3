pub mod init;
pub mod leaderboard;
pub mod menu;
pub mod play;
pub mod resume;
pub mod validate;
