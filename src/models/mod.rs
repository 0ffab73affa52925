pub mod booking;
pub mod inquiry;
pub mod room;
pub mod user;

pub use booking::{Booking, BookingStatus};
pub use inquiry::{Inquiry, InquiryStatus};
pub use room::Room;
pub use user::{Role, User, UserResponse};
