use std::num::NonZeroU32;

use anyhow::{Context, Result, bail};
use restomod_client::{BlogSource, PagedListing};
use restomod_core::{BlogPost, LoadState, Page, PageSpec, Selector};
use time::format_description::well_known::Rfc3339;

use crate::cli::BlogArgs;
use crate::commands::AppContext;

pub async fn handle(ctx: &AppContext, args: BlogArgs) -> Result<()> {
    let spec = page_spec(ctx, &args)?;
    let listing = PagedListing::new(BlogSource::new(ctx.client.clone()), spec.clone());
    listing.load().await;

    match listing.into_view().into_state() {
        LoadState::Success(page) => print_page(ctx, &spec, &page),
        LoadState::Error(err) => {
            eprintln!("Retry with: {}", retry_command(&spec));
            Err(err.into())
        }
        LoadState::Idle | LoadState::Loading => bail!("Blog request did not complete"),
    }
}

fn page_spec(ctx: &AppContext, args: &BlogArgs) -> Result<PageSpec> {
    let page_size = match args.page_size {
        Some(size) => size,
        None => NonZeroU32::new(ctx.config.blog.page_size)
            .context("blog.page_size in the config file must be at least 1")?,
    };

    Ok(PageSpec {
        page: args.page,
        page_size,
        category: args.category.clone(),
    })
}

fn print_page(ctx: &AppContext, spec: &PageSpec, page: &Page<BlogPost>) -> Result<()> {
    if ctx.json {
        return ctx.print_json(page);
    }

    if page.is_empty() {
        println!("No posts on page {}.", spec.page);
    }

    for post in &page.items {
        println!("{}", post.title);
        if let Some(category) = &post.category {
            println!("  Category: {}", category);
        }
        if let Some(author) = &post.author {
            println!("  Author: {}", author);
        }
        if let Some(published) = post.published_at.and_then(|at| at.format(&Rfc3339).ok()) {
            println!("  Published: {}", published);
        }
        if let Some(excerpt) = &post.excerpt {
            println!("  {}", excerpt);
        }
    }

    println!(
        "\nPage {} of {} ({} posts)",
        spec.page, page.total_pages, page.total_count
    );
    if page.has_next(spec.page) {
        println!("Next: {}", retry_command(&spec.with_page(spec.page.saturating_add(1))));
    }

    Ok(())
}

/// The command line that re-issues `spec`
fn retry_command(spec: &PageSpec) -> String {
    let mut command = format!(
        "restomod blog --page {} --page-size {}",
        spec.page, spec.page_size
    );
    if let Selector::Only(category) = &spec.category {
        command.push_str(&format!(" --category {:?}", category));
    }
    command
}
