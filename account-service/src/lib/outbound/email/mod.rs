pub mod smtp;
pub mod templates;

pub use smtp::SmtpVerificationMailer;
pub use templates::VerificationEmail;
