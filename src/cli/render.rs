//! Text rendering for the view commands.
//!
//! Pure functions from fetched resources to terminal output. Empty result
//! sets render explicit "none available" lines rather than errors.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

use crate::types::{Branch, BranchSummary, FacultyProfile, Post, SubjectContent};

/// Longest article preview shown in listings.
const PREVIEW_LEN: usize = 50;

pub fn render_branch_grid(branches: &[BranchSummary]) -> String {
    let mut out = String::from("Select Your Branch\n\n");

    if branches.is_empty() {
        out.push_str("No branches available.\n");
        return out;
    }

    for branch in branches {
        out.push_str(&format!("  {:<30} {}\n", branch.branch_name, branch.id));
    }
    out
}

pub fn render_branch_years(branch: &Branch, privileged: bool) -> String {
    let mut out = format!("{}\n\n", branch.branch_name);

    for year in &branch.years {
        out.push_str(&format!("{} Year  ({})\n", year.label, year.id));

        if year.subjects.is_empty() {
            out.push_str("  No subjects available\n");
        } else {
            for subject in &year.subjects {
                out.push_str(&format!("  {:<30} {}\n", subject.name, subject.id));
            }
        }

        // The add-subject control only exists for faculty sessions.
        if privileged {
            out.push_str(&format!(
                "  + Add subject: campus years add-subject {} {} <name>\n",
                branch.id, year.id
            ));
        }
        out.push('\n');
    }
    out
}

pub fn render_subject_content(subject_name: Option<&str>, content: &SubjectContent) -> String {
    let mut out = String::new();
    if let Some(name) = subject_name {
        out.push_str(&format!("{name}\n\n"));
    }

    out.push_str("Articles\n");
    if content.articles.is_empty() {
        out.push_str("  No articles available.\n");
    } else {
        for article in &content.articles {
            let by = article.posted_by_name.as_deref().unwrap_or("Unknown");
            let branch = article.posted_by_branch.as_deref().unwrap_or("Unknown");
            out.push_str(&format!(
                "  {}\n    by {} ({})\n",
                preview(&article.body),
                by,
                branch
            ));
        }
    }

    out.push_str("\nFiles\n");
    if content.files.is_empty() {
        out.push_str("  No files available.\n");
    } else {
        for file in &content.files {
            let by = file.posted_by_name.as_deref().unwrap_or("Unknown");
            out.push_str(&format!("  {}  by {}\n", file.description, by));
            if let Some(url) = &file.file_url {
                out.push_str(&format!("    download: {url}\n"));
            }
        }
    }
    out
}

pub fn render_faculty_profile(profile: &FacultyProfile, total_posts: usize) -> String {
    let mut out = String::from("Faculty\n");
    out.push_str(&format!(
        "  ID:         {}\n",
        profile.id.as_deref().unwrap_or("No ID")
    ));
    out.push_str(&format!(
        "  Name:       {}\n",
        profile.name.as_deref().unwrap_or("No Name")
    ));
    out.push_str(&format!(
        "  Email:      {}\n",
        profile.email.as_deref().unwrap_or("N/A")
    ));
    out.push_str(&format!(
        "  Department: {}\n",
        profile.department.as_deref().unwrap_or("N/A")
    ));
    out.push_str(&format!("  Total Posts: {total_posts}\n"));
    out.push_str(&format!(
        "  Created At: {}\n",
        profile
            .created_at
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "N/A".to_string())
    ));
    out
}

/// Per-month post counts, oldest month first. Posts without a timestamp
/// land in a trailing "Unknown" bucket.
pub fn posts_per_month(posts: &[Post]) -> Vec<(String, usize)> {
    let mut months: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    let mut unknown = 0usize;

    for post in posts {
        match post.created_at() {
            Some(dt) => *months.entry((dt.year(), dt.month())).or_default() += 1,
            None => unknown += 1,
        }
    }

    let mut rows: Vec<(String, usize)> = months
        .into_iter()
        .map(|((year, month), count)| {
            let label = NaiveDate::from_ymd_opt(year, month, 1)
                .map(|d| d.format("%b %Y").to_string())
                .unwrap_or_else(|| format!("{year}-{month:02}"));
            (label, count)
        })
        .collect();

    if unknown > 0 {
        rows.push(("Unknown".to_string(), unknown));
    }
    rows
}

pub fn render_posts_histogram(posts: &[Post]) -> String {
    let mut out = String::from("Posts Per Month\n");
    let rows = posts_per_month(posts);

    if rows.is_empty() {
        out.push_str("  (no posts)\n");
        return out;
    }

    for (label, count) in rows {
        out.push_str(&format!("  {:<10} {:>3} {}\n", label, count, "#".repeat(count)));
    }
    out
}

pub fn render_faculty_posts(posts: &[Post]) -> String {
    let mut out = String::from("Posts\n");

    if posts.is_empty() {
        out.push_str("  No posts uploaded yet.\n");
        return out;
    }

    for post in posts {
        let date = post
            .created_at()
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        out.push_str(&format!(
            "  [{}] {}  ({})\n",
            post.kind(),
            preview(post.summary()),
            date
        ));
    }
    out
}

fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_LEN {
        let cut: String = text.chars().take(PREVIEW_LEN).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}
