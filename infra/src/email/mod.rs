//! Email delivery implementations.

pub mod mock_email;
pub mod resend;
pub mod templates;

pub use mock_email::MockEmailService;
pub use resend::ResendEmailService;
