/// Rendered verification email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

impl VerificationEmail {
    /// Render the verification email for one recipient.
    ///
    /// The recipient name and link are HTML-escaped in the HTML part.
    pub fn render(app_name: &str, recipient_name: &str, verification_link: &str) -> Self {
        let name = html_escape::encode_text(recipient_name);
        let app = html_escape::encode_text(app_name);
        let href = html_escape::encode_double_quoted_attribute(verification_link);
        let link = html_escape::encode_text(verification_link);

        let html = format!(
            r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: auto; padding: 20px; border: 1px solid #eee; border-radius: 10px;">
  <div style="text-align: center;">
    <h2 style="color: #2c3e50;">Verify Your Email</h2>
  </div>
  <p>Hi <strong>{name}</strong>,</p>
  <p>Thanks for signing up at <strong>{app}</strong>! Click the button below to verify your email:</p>
  <div style="text-align: center; margin: 30px 0;">
    <a href="{href}" style="background-color: #4CAF50; color: white; padding: 12px 25px; text-decoration: none; border-radius: 5px; font-size: 16px;">
      Verify Email
    </a>
  </div>
  <p>If the button doesn't work, paste this link into your browser:</p>
  <p style="word-break: break-word; color: #555;">{link}</p>
  <hr />
  <p style="font-size: 12px; color: #888;">If you didn't request this email, you can safely ignore it.</p>
</div>"#
        );

        let text = format!(
            "Hi {recipient_name},\n\n\
             Thanks for signing up at {app_name}! Open the link below to verify your email:\n\n\
             {verification_link}\n\n\
             If you didn't request this email, you can safely ignore it.\n"
        );

        Self {
            subject: format!("Verify Your Email - {}", app_name),
            html,
            text,
        }
    }
}
