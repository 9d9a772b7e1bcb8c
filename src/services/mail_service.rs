//! Lead notifications
//!
//! A lead is mailed to the prospect with the dealership in BCC. The HTML
//! body is rendered from an embedded template; the plain-text part is a
//! fixed fallback notice.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use minijinja::{context, Environment};
use thiserror::Error;
use tracing::{error, info};

use crate::config::{DealershipConfig, MailConfig};
use crate::dto::lead_dto::ValidLead;
use crate::models::Vehicle;

const LEAD_TEMPLATE_NAME: &str = "lead_email.html";
const LEAD_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
  <body style="font-family: Arial, sans-serif; color: #222;">
    <h2>{{ dealership_name }}</h2>
    <p>Hi {{ full_name }},</p>
    <p>Thank you for your interest in the {{ title }}. A member of our sales team will contact you shortly.</p>
    <table cellpadding="4">
      <tr><td><strong>Stock #</strong></td><td>{{ stock_num }}</td></tr>
      {% if vin %}<tr><td><strong>VIN</strong></td><td>{{ vin }}</td></tr>{% endif %}
      {% if price %}<tr><td><strong>Price</strong></td><td>{{ price }}</td></tr>{% endif %}
      {% if odometer %}<tr><td><strong>Odometer</strong></td><td>{{ odometer }} miles</td></tr>{% endif %}
    </table>
    <p><a href="{{ listing_url }}">View this vehicle</a></p>
    {% if dealership_address %}<p>{{ dealership_address }}</p>{% endif %}
    <p style="color: #888; font-size: 12px;">Request received {{ received_at }}</p>
  </body>
</html>
"#;

/// Plain-text alternative for clients without HTML support
pub const PLAIN_TEXT_FALLBACK: &str = "Your email provider does not support HTML content.";

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Could not build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Everything needed to notify one lead
#[derive(Debug, Clone)]
pub struct LeadNotification {
    pub lead: ValidLead,
    pub vehicle: Vehicle,
    pub received_at: DateTime<Utc>,
}

impl LeadNotification {
    pub fn new(lead: ValidLead, vehicle: Vehicle) -> Self {
        Self {
            lead,
            vehicle,
            received_at: Utc::now(),
        }
    }

    pub fn subject(&self) -> String {
        format!("Vehicle Interest - {}", self.vehicle.title())
    }
}

#[async_trait]
pub trait LeadMailer: Send + Sync {
    async fn send_lead(&self, notification: &LeadNotification) -> Result<(), MailError>;
}

/// Render the HTML body of a lead email
pub fn render_lead_email(
    notification: &LeadNotification,
    dealership: &DealershipConfig,
) -> Result<String, MailError> {
    let mut env = Environment::new();
    env.add_template(LEAD_TEMPLATE_NAME, LEAD_TEMPLATE)?;

    let vehicle = &notification.vehicle;
    let stock_num = notification.lead.stock_num.as_str();

    let html = env.get_template(LEAD_TEMPLATE_NAME)?.render(context! {
        dealership_name => &dealership.name,
        dealership_address => &dealership.address,
        full_name => &notification.lead.full_name,
        title => vehicle.title(),
        stock_num => stock_num,
        vin => &vehicle.vin,
        price => vehicle.price.map(|p| format!("{:.2} {}", p, dealership.currency)),
        odometer => vehicle.odometer,
        listing_url => dealership.listing_url(stock_num),
        received_at => notification.received_at.format("%Y-%m-%d %H:%M UTC").to_string(),
    })?;

    Ok(html)
}

/// SMTP delivery over lettre's tokio transport
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    company: Mailbox,
    dealership: DealershipConfig,
}

impl SmtpMailer {
    pub fn new(mail: &MailConfig, dealership: DealershipConfig) -> Result<Self, MailError> {
        // 465 is implicit TLS, anything else negotiates STARTTLS
        let builder = if mail.port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&mail.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&mail.host)?
        };

        let transport = builder
            .port(mail.port)
            .credentials(Credentials::new(
                mail.username.clone(),
                mail.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            sender: mail.username.parse()?,
            company: mail.company_email.parse()?,
            dealership,
        })
    }

    pub fn build_message(&self, notification: &LeadNotification) -> Result<Message, MailError> {
        let html = render_lead_email(notification, &self.dealership)?;
        let recipient: Mailbox = notification.lead.email.parse()?;

        let message = Message::builder()
            .from(self.sender.clone())
            .to(recipient)
            .bcc(self.company.clone())
            .subject(notification.subject())
            .multipart(MultiPart::alternative_plain_html(
                PLAIN_TEXT_FALLBACK.to_string(),
                html,
            ))?;

        Ok(message)
    }
}

#[async_trait]
impl LeadMailer for SmtpMailer {
    async fn send_lead(&self, notification: &LeadNotification) -> Result<(), MailError> {
        let message = self.build_message(notification)?;

        match self.transport.send(message).await {
            Ok(_) => {
                info!(
                    "📧 Lead for {} sent to {}",
                    notification.lead.stock_num, notification.lead.email
                );
                Ok(())
            }
            Err(e) => {
                error!("❌ Failed to send lead for {}: {}", notification.lead.stock_num, e);
                Err(MailError::Transport(e))
            }
        }
    }
}
