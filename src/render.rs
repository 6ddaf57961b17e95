//! Plain-text rendering of profiles, result pages and quotas.

use colored::Colorize;

use crate::models::{GitHubUser, RateLimitResource, RateLimitStatus};
use crate::pagination::PageLink;
use crate::recipes::Recipe;
use crate::view::{with_separators, SearchForm, SearchView};

/// Compact count: `1234` becomes `1.2k`, smaller values keep separators.
pub fn format_count(n: u64) -> String {
    if n >= 1000 {
        let scaled = format!("{:.1}", n as f64 / 1000.0);
        let trimmed = scaled.strip_suffix(".0").unwrap_or(&scaled);
        format!("{trimmed}k")
    } else {
        with_separators(n)
    }
}

/// A profile card. Lines are newline-separated, without a trailing newline.
pub fn user_card(user: &GitHubUser) -> String {
    let mut lines = vec![
        format!("{} {}", user.display_name().bold(), format!("@{}", user.login).cyan()),
        match user.bio.as_deref().map(str::trim).filter(|b| !b.is_empty()) {
            Some(bio) => bio.to_string(),
            None => "No bio available".italic().dimmed().to_string(),
        },
    ];

    let mut stats = Vec::new();
    if let Some(location) = user.location.as_deref().filter(|l| !l.is_empty()) {
        stats.push(location.to_string());
    }
    stats.push(format!("{} followers", format_count(u64::from(user.followers))));
    stats.push(format!("{} repos", format_count(u64::from(user.public_repos))));
    lines.push(stats.join("  ·  ").dimmed().to_string());

    lines.push(user.html_url.underline().to_string());
    lines.join("\n")
}

/// Longer form of a profile for the single-user lookup.
pub fn user_detail(user: &GitHubUser) -> String {
    let mut out = user_card(user);
    out.push_str(&format!(
        "\n{} following  ·  joined {}",
        format_count(u64::from(user.following)),
        user.created_at.split('T').next().unwrap_or(&user.created_at)
    ));
    for (label, value) in [
        ("company", &user.company),
        ("blog", &user.blog),
        ("twitter", &user.twitter_username),
    ] {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            out.push_str(&format!("\n{label}: {value}"));
        }
    }
    out
}

/// Page controls, or `None` when there is at most one page.
pub fn pagination_bar(view: &SearchView) -> Option<String> {
    let results = view.results();
    if results.total_pages <= 1 {
        return None;
    }

    let current = results.page as usize;
    let mut parts = vec![if results.page > 1 {
        "‹".to_string()
    } else {
        "‹".dimmed().to_string()
    }];

    for link in view.pages() {
        parts.push(match link {
            PageLink::Page(n) if n == current => format!("[{n}]").bold().to_string(),
            PageLink::Page(n) => n.to_string(),
            PageLink::Gap => "...".dimmed().to_string(),
        });
    }

    parts.push(if u64::from(results.page) < results.total_pages {
        "›".to_string()
    } else {
        "›".dimmed().to_string()
    });

    Some(parts.join(" "))
}

/// Header, cards and pagination for the current view.
pub fn results(view: &SearchView, form: &SearchForm) -> String {
    if let Some(error) = view.error() {
        return error.red().to_string();
    }

    if view.is_no_results() {
        return format!(
            "{}\nTry adjusting your search criteria to find more users.",
            "No users found".bold()
        );
    }

    let mut sections = vec![format!(
        "{}\n{}",
        view.headline().bold(),
        form.summary().dimmed()
    )];
    sections.extend(view.results().items.iter().map(user_card));
    if let Some(bar) = pagination_bar(view) {
        sections.push(bar);
    }
    sections.join("\n\n")
}

fn quota_line(name: &str, quota: &RateLimitResource) -> String {
    format!(
        "{name:<8}{:>6} / {:<6} used {:<6} resets at {}",
        quota.remaining, quota.limit, quota.used, quota.reset
    )
}

pub fn rate_limit(status: &RateLimitStatus) -> String {
    [
        quota_line("core", &status.resources.core),
        quota_line("search", &status.resources.search),
    ]
    .join("\n")
}

pub fn recipe_line(recipe: &Recipe, favorite: bool) -> String {
    let marker = if favorite { "★".yellow().to_string() } else { " ".to_string() };
    let mut line = format!("{marker} #{:<4} {}", recipe.id, recipe.title.bold());
    if !recipe.description.is_empty() {
        line.push_str(&format!(" - {}", recipe.description.dimmed()));
    }
    line
}
