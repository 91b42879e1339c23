pub mod relocator;
pub mod session;
pub mod validator;

pub use relocator::{CollisionPolicy, Destinations, Relocator};
pub use session::{Decision, Mode, Session, SessionError, SessionOptions, Snapshot, Step};
pub use validator::decode_image;
