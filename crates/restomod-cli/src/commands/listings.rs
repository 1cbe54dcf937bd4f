use anyhow::{Context, Result};
use restomod_core::JobPosting;

use crate::commands::{AppContext, format_price};

pub async fn brands(ctx: &AppContext) -> Result<()> {
    let brands = ctx
        .client
        .fetch_brands()
        .await
        .context("Could not load brands. Run the same command again to retry")?;

    if ctx.json {
        return ctx.print_json(&brands);
    }

    if brands.is_empty() {
        println!("No brands found.");
        return Ok(());
    }

    println!("Brands:");
    for brand in brands {
        match &brand.country {
            Some(country) => println!("  {} ({})", brand.name, country),
            None => println!("  {}", brand.name),
        }
    }

    Ok(())
}

pub async fn jobs(ctx: &AppContext, all: bool) -> Result<()> {
    let jobs = ctx
        .client
        .fetch_jobs()
        .await
        .context("Could not load job postings. Run the same command again to retry")?;
    let jobs = visible_jobs(jobs, all);

    if ctx.json {
        return ctx.print_json(&jobs);
    }

    if jobs.is_empty() {
        println!("No open positions.");
        return Ok(());
    }

    for job in jobs {
        let closed = if job.active { "" } else { " (closed)" };
        println!("{}{}", job.title, closed);
        println!("  ID: {}", job.id);
        let details: Vec<&str> = [&job.department, &job.location, &job.employment_type]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .collect();
        if !details.is_empty() {
            println!("  {}", details.join(" · "));
        }
    }

    Ok(())
}

fn visible_jobs(jobs: Vec<JobPosting>, all: bool) -> Vec<JobPosting> {
    if all {
        jobs
    } else {
        jobs.into_iter().filter(|job| job.active).collect()
    }
}

pub async fn packages(ctx: &AppContext) -> Result<()> {
    let packages = ctx
        .client
        .fetch_packages()
        .await
        .context("Could not load packages. Run the same command again to retry")?;

    if ctx.json {
        return ctx.print_json(&packages);
    }

    if packages.is_empty() {
        println!("No packages found.");
        return Ok(());
    }

    for package in packages {
        println!("{} - {}", package.name, format_price(package.price));
        for feature in &package.features {
            println!("  • {}", feature);
        }
    }

    Ok(())
}
