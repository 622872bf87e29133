use gevity_core::{AppViewModel, JobKind, ProgressView};

const BAR_WIDTH: usize = 24;

/// Render the view model as the lines printed after every state change.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("== {} ==", view.title));
    lines.push(match (&view.repo_name, view.locator.trim().is_empty()) {
        (_, true) => "repo: (none)".to_string(),
        (Some(name), false) => format!("repo: {} [{}]", view.locator.trim(), name),
        (None, false) => format!("repo: {} [not a repository yet]", view.locator.trim()),
    });
    lines.push(format!(
        "user: {} | token: {}",
        view.username.as_deref().unwrap_or("-"),
        if view.token_set { "set" } else { "-" }
    ));

    lines.push(action_line("ingest", JobKind::Ingest, view.can_ingest, view));
    if view.sync_offered {
        lines.push(action_line("sync", JobKind::Sync, view.can_sync, view));
    }

    if let Some(progress) = &view.progress {
        lines.extend(render_progress(progress));
    }
    lines
}

fn action_line(command: &str, kind: JobKind, enabled: bool, view: &AppViewModel) -> String {
    if view.submitting {
        format!("  {command:<7} … working")
    } else if enabled {
        format!("  {command:<7} {}", kind.label())
    } else {
        format!("  {command:<7} {} (unavailable)", kind.label())
    }
}

fn render_progress(progress: &ProgressView) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(steps) = &progress.steps {
        lines.push(format!(
            "{:<14} {} {:>3}%",
            steps.label(),
            bar(f64::from(steps.percent)),
            steps.percent
        ));
    }
    lines.push(format!(
        "{:<14} {} {:>3}%",
        "",
        bar(progress.percent),
        progress.percent.round() as u8
    ));
    if let Some(message) = &progress.message {
        lines.push(message.clone());
    }
    lines
}

fn bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}
