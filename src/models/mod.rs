pub mod event;
pub mod login_session;
pub mod user;
pub mod visit;
pub mod website;

pub use event::TrackedEvent;
pub use login_session::LoginSession;
pub use user::{Role, User, UserView};
pub use visit::{DailyStat, VisitorSession};
pub use website::Website;
