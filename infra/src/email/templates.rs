//! HTML bodies for the account lifecycle emails.
//!
//! Kept as plain format strings; there is no template engine on purpose.

/// Body for the verification code email
pub fn verification_email(code: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2>Verify your email</h2>
  <p>Thanks for signing up! Enter this code to verify your email address:</p>
  <p style="font-size: 32px; font-weight: bold; letter-spacing: 6px; text-align: center;">{code}</p>
  <p>The code expires in 1 hour. If you didn't create an account, you can ignore this email.</p>
</div>"#
    )
}

/// Body for the welcome email sent after verification
pub fn welcome_email(name: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2>Welcome, {name}!</h2>
  <p>Your email is verified and your account is ready to use.</p>
</div>"#
    )
}

/// Body for the password reset request email
pub fn password_reset_request_email(reset_url: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2>Reset your password</h2>
  <p>We received a request to reset your password. Click the button below to choose a new one:</p>
  <p style="text-align: center;">
    <a href="{reset_url}" style="background: #4CAF50; color: white; padding: 12px 24px; text-decoration: none; border-radius: 4px;">Reset Password</a>
  </p>
  <p>The link expires in 1 hour. If you didn't ask for this, you can ignore this email.</p>
</div>"#
    )
}

/// Body for the password reset confirmation email
pub fn password_reset_success_email() -> String {
    r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2>Password changed</h2>
  <p>Your password was reset successfully. If this wasn't you, contact support immediately.</p>
</div>"#
        .to_string()
}

/// Body for the passwordless login email
pub fn magic_link_email(login_url: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2>Your login link</h2>
  <p>Click the button below to sign in. No password needed:</p>
  <p style="text-align: center;">
    <a href="{login_url}" style="background: #4CAF50; color: white; padding: 12px 24px; text-decoration: none; border-radius: 4px;">Sign In</a>
  </p>
  <p>The link expires in 10 minutes and only works once per session.</p>
</div>"#
    )
}
