use crate::app::RouteOutcome;

pub fn render_route_report(outcome: &RouteOutcome) -> String {
    let mut out = String::new();
    out.push_str("Notification\n");
    out.push_str("------------\n");
    out.push_str(&format!(
        "Type: {}\n\n",
        outcome.notification_type.as_deref().unwrap_or("N/A")
    ));

    out.push_str("DeepLink\n");
    out.push_str("--------\n");
    out.push_str(&format!(
        "{}\n\n",
        outcome.deep_link.as_deref().unwrap_or("N/A")
    ));

    out.push_str("Target\n");
    out.push_str("------\n");
    match &outcome.target {
        Some(target) => out.push_str(&format!("{target}\n")),
        None => out.push_str("None (navigation skipped)\n"),
    }
    if let Some(reason) = &outcome.rejection {
        out.push_str(&format!("Reason: {reason}\n"));
    }
    out
}
