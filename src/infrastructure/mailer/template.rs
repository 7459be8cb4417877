use crate::entities::contact::ContactSubmission;

/// Escape the five characters that matter for HTML interpolation. Every
/// user-supplied field goes through this before it reaches the message body;
/// the operator's mail client renders whatever we put here.
pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn subject(submission: &ContactSubmission) -> String {
    format!("New project inquiry from {}", submission.name)
}

/// HTML notification body. All submission fields are escaped; the optional
/// ones render a placeholder when absent.
pub fn html_body(submission: &ContactSubmission, site_url: Option<&str>) -> String {
    let phone = submission
        .phone
        .as_deref()
        .map(escape_html)
        .unwrap_or_else(|| "Not provided".to_string());
    let details = submission
        .project_details
        .as_deref()
        .map(escape_html)
        .unwrap_or_else(|| "Not provided".to_string());

    let footer = match site_url {
        Some(url) => format!("Sent from the contact form at {}", escape_html(url)),
        None => "Sent from the website contact form".to_string(),
    };

    format!(
        r#"<html>
<body style="font-family: sans-serif; color: #1f2937; line-height: 1.5;">
  <h2 style="margin-bottom: 4px;">New project inquiry</h2>
  <table cellpadding="4">
    <tr><td><strong>Name</strong></td><td>{name}</td></tr>
    <tr><td><strong>Email</strong></td><td>{email}</td></tr>
    <tr><td><strong>Phone</strong></td><td>{phone}</td></tr>
  </table>
  <h3 style="margin-bottom: 4px;">Project details</h3>
  <p style="white-space: pre-wrap;">{details}</p>
  <hr>
  <p style="font-size: 12px; color: #6b7280;">{footer}</p>
</body>
</html>"#,
        name = escape_html(&submission.name),
        email = escape_html(&submission.email),
        phone = phone,
        details = details,
        footer = footer,
    )
}
