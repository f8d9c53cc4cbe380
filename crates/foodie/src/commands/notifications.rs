//! Notification command handlers.

use chrono::{DateTime, Local};
use serde::Serialize;
use tabled::Tabled;

use foodie_core::{AdminClient, Notification, UnreadCount, relative_time};

use crate::cli::{GlobalOpts, NotificationsArgs, NotificationsCommand, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct NotificationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "")]
    status: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Received")]
    received: String,
}

fn row(n: &Notification, now: &DateTime<Local>, color: bool) -> NotificationRow {
    NotificationRow {
        id: n.id.clone(),
        status: if n.is_read {
            String::new()
        } else {
            output::accent("●", color)
        },
        kind: n.kind.to_string(),
        title: n.title.clone(),
        received: relative_time(now, &n.created_at),
    }
}

fn detail(n: &Notification) -> String {
    let received = relative_time(&Local::now(), &n.created_at);
    [
        format!("ID:        {}", n.id),
        format!("Type:      {}", n.kind),
        format!("Title:     {}", n.title),
        format!(
            "Received:  {received} ({})",
            n.created_at.format("%Y-%m-%d %H:%M UTC")
        ),
        format!("Status:    {}", if n.is_read { "read" } else { "unread" }),
        String::new(),
        n.message.clone(),
    ]
    .join("\n")
}

/// One page of the list as emitted by the JSON formats.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageView {
    page: usize,
    total_pages: usize,
    total: usize,
    unread: u64,
    items: Vec<Notification>,
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &AdminClient,
    args: NotificationsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let center = client.notifications();
    let color = output::should_color(global.color);

    match args.command {
        NotificationsCommand::List { page } => {
            center.refresh().await?;
            if let Err(err) = center.refresh_unread_count().await {
                output::print_warning(&format!("unread count unavailable: {err}"), global.quiet);
            }
            if page != 1 && !center.set_page(page) {
                return Err(CliError::Validation {
                    field: "page".into(),
                    reason: format!("expected 1..={}, got {page}", center.total_pages().max(1)),
                });
            }

            let view = PageView {
                page: center.page(),
                total_pages: center.total_pages(),
                total: center.len(),
                unread: center.unread_count(),
                items: center.current_page_items(),
            };

            let out = match global.output {
                OutputFormat::Table if view.items.is_empty() => "No notifications".to_owned(),
                OutputFormat::Table => {
                    let now = Local::now();
                    let table = output::render_list(
                        global.output,
                        &view.items,
                        |n| row(n, &now, color),
                        |n| n.id.clone(),
                    )?;
                    let footer = format!(
                        "Page {} of {} | {} total | {} unread",
                        view.page,
                        view.total_pages.max(1),
                        view.total,
                        view.unread
                    );
                    format!("{table}\n{}", output::dim(&footer, color))
                }
                OutputFormat::Plain => output::render_list(
                    global.output,
                    &view.items,
                    |n| row(n, &Local::now(), false),
                    |n| n.id.clone(),
                )?,
                OutputFormat::Json | OutputFormat::JsonCompact => {
                    output::render_single(global.output, &view, |_| String::new(), |_| String::new())?
                }
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        NotificationsCommand::Unread => {
            let count = center.refresh_unread_count().await?;
            let out = output::render_single(
                global.output,
                &UnreadCount { count },
                |u| format!("{} unread", u.count),
                |u| u.count.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        NotificationsCommand::View { id } => {
            center.refresh().await?;
            let viewed = center.view(&id).await?;
            if let Some(err) = &viewed.count_error {
                output::print_warning(
                    &format!("marked read, but the unread count could not be refreshed: {err}"),
                    global.quiet,
                );
            }
            let out = output::render_single(
                global.output,
                &*viewed.notification,
                detail,
                |n| n.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        NotificationsCommand::ReadAll => {
            let result = center.mark_all_read().await?;
            util::warn_stale(&result.refresh_errors, global);
            let message = format!(
                "{} ({} unread)",
                result
                    .value
                    .message
                    .as_deref()
                    .unwrap_or("All notifications marked read"),
                center.unread_count()
            );
            let out = output::render_outcome(global.output, &result.value, &message)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        NotificationsCommand::Delete { id } => {
            if !util::confirm(
                "notifications delete",
                &format!("Delete notification '{id}'?"),
                global,
            )? {
                return Ok(());
            }
            let result = center.delete(&id).await?;
            util::warn_stale(&result.refresh_errors, global);
            let message = result
                .value
                .message
                .clone()
                .unwrap_or_else(|| format!("Deleted notification {id}"));
            let out = output::render_outcome(global.output, &result.value, &message)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
