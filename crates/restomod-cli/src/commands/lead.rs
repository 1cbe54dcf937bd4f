use anyhow::Result;
use restomod_client::SubmitError;
use restomod_forms::{
    ContactForm, CustomRequest, JobApplication, LeadForm, NewsletterSignup, TestDriveBooking,
};

use crate::cli::LeadCommands;
use crate::commands::AppContext;

pub async fn handle(ctx: &AppContext, cmd: LeadCommands) -> Result<()> {
    match cmd {
        LeadCommands::Contact {
            name,
            email,
            phone,
            subject,
            message,
        } => {
            let form = ContactForm {
                name,
                email,
                phone,
                subject,
                message,
            };
            send(ctx, &form).await
        }
        LeadCommands::Newsletter { email } => send(ctx, &NewsletterSignup { email }).await,
        LeadCommands::CustomRequest {
            name,
            email,
            phone,
            base_model,
            budget,
            details,
        } => {
            let form = CustomRequest {
                name,
                email,
                phone,
                base_model,
                budget,
                details,
            };
            send(ctx, &form).await
        }
        LeadCommands::Apply {
            job_id,
            name,
            email,
            phone,
            cover_letter,
            cv_url,
        } => {
            let form = JobApplication {
                job_id,
                name,
                email,
                phone,
                cover_letter,
                cv_url,
            };
            send(ctx, &form).await
        }
        LeadCommands::TestDrive {
            item_id,
            name,
            email,
            phone,
            date,
            time_slot,
        } => {
            let form = TestDriveBooking {
                item_id,
                name,
                email,
                phone,
                date,
                time_slot,
            };
            send(ctx, &form).await
        }
    }
}

async fn send<F: LeadForm>(ctx: &AppContext, form: &F) -> Result<()> {
    match ctx.client.submit(form).await {
        Ok(()) => {
            if ctx.json {
                ctx.print_json(&serde_json::json!({ "sent": form.kind().to_string() }))
            } else {
                println!("✓ Sent {} request", form.kind());
                Ok(())
            }
        }
        Err(SubmitError::Validation(err)) => {
            eprintln!("Please fix the following fields:");
            for field in err.fields() {
                eprintln!("  - {}", field);
            }
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}
