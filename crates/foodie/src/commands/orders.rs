//! Order payment handlers.

use foodie_core::{AdminClient, PaymentConfirmation, PaymentVerification};

use crate::cli::{GlobalOpts, OrdersArgs, OrdersCommand, OutputFormat};
use crate::error::CliError;
use crate::output;

fn detail(c: &PaymentConfirmation) -> String {
    let mut lines = vec!["Payment confirmed".to_owned()];
    if let Some(order) = &c.order {
        lines.push(format!("Order:     {}", order.id));
        lines.push(format!("Status:    {}", order.status.as_deref().unwrap_or("-")));
        if let Some(total) = order.total_amount {
            lines.push(format!("Total:     {total:.2}"));
        }
    }
    if let Some(message) = &c.message {
        lines.push(message.clone());
    }
    lines.join("\n")
}

pub async fn handle(
    client: &AdminClient,
    args: OrdersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        OrdersCommand::Verify {
            order_id,
            payment_id,
            signature,
        } => {
            let verification = PaymentVerification {
                order_id,
                payment_id,
                signature,
                user_id: None,
            };
            let confirmation = client.distributor().verify_payment(&verification).await?;
            let out = match global.output {
                OutputFormat::Plain => confirmation
                    .order
                    .as_ref()
                    .map(|o| o.id.clone())
                    .unwrap_or_default(),
                format => output::render_outcome(format, &*confirmation, &detail(&confirmation))?,
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
