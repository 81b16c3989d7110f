//! Message bodies for outbound email.

use momentos_core::traits::mailer::EmailMessage;

/// Email carrying a password-reset code.
pub fn password_reset_code(to: &str, username: &str, code: &str, ttl_minutes: i64) -> EmailMessage {
    let text_body = format!(
        "Hello {username},\n\n\
         Your password reset code is: {code}\n\n\
         The code expires in {ttl_minutes} minutes. \
         If you did not ask for this, you can ignore this email.\n"
    );
    let html_body = format!(
        "<html><body style=\"font-family: -apple-system, 'Segoe UI', Roboto, Arial; color: #222;\">\
         <div style=\"max-width:600px;margin:0 auto;padding:16px;\">\
         <h2>Password reset</h2>\
         <p>Hello {username},</p>\
         <p>Your password reset code is:</p>\
         <p style=\"font-size:20px;font-weight:700;letter-spacing:2px;background:#f5f5f5;\
         padding:12px;border-radius:6px;display:inline-block;\">{code}</p>\
         <p style=\"color:#666;\">The code expires in {ttl_minutes} minutes. \
         If you did not ask for this, you can ignore this email.</p>\
         </div></body></html>"
    );

    EmailMessage {
        to: to.to_string(),
        subject: "Password reset code".to_string(),
        text_body,
        html_body: Some(html_body),
    }
}
