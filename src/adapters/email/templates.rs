//! HTML bodies for outbound email.
//!
//! Each renderer returns a [`RenderedEmail`] so the SMTP and logging
//! mailers share exactly the same content.

use crate::ports::{ConfirmationEmail, WebinarLinkEmail};

const BRAND_COLOR: &str = "#006478";

/// Subject line plus HTML body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

/// Minimal escaping for values interpolated into HTML text and attributes.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(heading: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
</head>
<body style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2 style="color: {color};">{heading}</h2>
{content}
    <hr style="border: 1px solid #e9e9e9; margin: 30px 0;">
    <p style="color: #999; font-size: 12px; text-align: center;">The Needles</p>
</body>
</html>
"#,
        color = BRAND_COLOR,
        heading = heading,
        content = content,
    )
}

pub fn otp(code: &str, expiry_minutes: i64) -> RenderedEmail {
    let content = format!(
        r#"    <p>Thank you for registering for the Fashion Business Webinar!</p>
    <p>Your verification code is:</p>
    <div style="background-color: #f5f5f5; padding: 20px; text-align: center; margin: 20px 0;">
        <h1 style="color: {color}; font-size: 36px; letter-spacing: 5px; margin: 0;">{code}</h1>
    </div>
    <p><strong>This code will expire in {minutes} minutes.</strong></p>
    <p>If you didn't request this code, please ignore this email.</p>"#,
        color = BRAND_COLOR,
        code = escape_html(code),
        minutes = expiry_minutes,
    );

    RenderedEmail {
        subject: "Email Verification - The Needles Webinar".to_string(),
        html: layout("Email Verification", &content),
    }
}

pub fn confirmation(email: &ConfirmationEmail) -> RenderedEmail {
    let settings = &email.settings;
    let content = format!(
        r#"    <p>Hi {name},</p>
    <p>Your payment was received and your seat for <strong>{title}</strong> is confirmed.</p>
    <table style="margin: 20px 0; border-collapse: collapse;">
        <tr><td style="padding: 4px 12px 4px 0; color: #666;">Date</td><td>{date}</td></tr>
        <tr><td style="padding: 4px 12px 4px 0; color: #666;">Time</td><td>{time}</td></tr>
        <tr><td style="padding: 4px 12px 4px 0; color: #666;">Order ID</td><td>{order_id}</td></tr>
        <tr><td style="padding: 4px 12px 4px 0; color: #666;">Payment ID</td><td>{payment_id}</td></tr>
    </table>
    <p>The joining link will be emailed to you before the webinar starts.</p>"#,
        name = escape_html(&email.name),
        title = escape_html(&settings.webinar_title),
        date = escape_html(&settings.webinar_date),
        time = escape_html(&settings.webinar_time),
        order_id = escape_html(&email.order_id),
        payment_id = escape_html(&email.payment_id),
    );

    RenderedEmail {
        subject: format!("Registration Confirmed - {}", settings.webinar_title),
        html: layout("Registration Confirmed", &content),
    }
}

pub fn webinar_link(email: &WebinarLinkEmail) -> RenderedEmail {
    let link = escape_html(&email.zoom_link);
    let content = format!(
        r#"    <p>Hi {name},</p>
    <p><strong>{title}</strong> is scheduled for {date}, {time}.</p>
    <p style="text-align: center; margin: 30px 0;">
        <a href="{link}" style="background-color: {color}; color: white; padding: 12px 24px; text-decoration: none; border-radius: 4px; display: inline-block;">Join Webinar</a>
    </p>
    <p style="color: #666; font-size: 14px;">Or copy and paste this link into your browser:</p>
    <p style="color: #666; font-size: 14px; word-break: break-all;">{link}</p>"#,
        name = escape_html(&email.name),
        title = escape_html(&email.webinar_title),
        date = escape_html(&email.webinar_date),
        time = escape_html(&email.webinar_time),
        link = link,
        color = BRAND_COLOR,
    );

    RenderedEmail {
        subject: format!("Your joining link - {}", email.webinar_title),
        html: layout("See you at the webinar", &content),
    }
}
