mod args;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use nutriplan_core::{
    application::create_service,
    domain::{
        common::NutriplanConfig,
        meal_plan::{GenerateMealPlanInput, MealPlanService},
    },
    infrastructure::snapshot::Snapshot,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::args::{Args, Command};

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv().ok();

    let args = Args::parse();
    init_tracing(args.log_json);

    let config = NutriplanConfig::from(&args);
    info!(provider = ?config.llm.provider, model = %config.pipeline.meal_plan.model, "starting nutriplan");

    let snapshot = Snapshot::from_path(&args.snapshot)?;
    let service = create_service(config, snapshot).context("failed to create service")?;

    let (body, failed) = match args.command {
        Command::MealPlan {
            patient_id,
            ingredients,
            religion,
            days,
        } => {
            let response = service
                .generate_meal_plan(GenerateMealPlanInput {
                    patient_id,
                    available_ingredients: ingredients,
                    religion_override: religion,
                    duration_days: days,
                })
                .await;
            (serde_json::to_string_pretty(&response)?, response.is_failure())
        }
        Command::Assessment { patient_id } => {
            let response = service.generate_assessment(patient_id).await;
            (serde_json::to_string_pretty(&response)?, response.is_failure())
        }
        Command::ReviewRecipes {
            patient_id,
            recipes,
        } => {
            let response = service.review_family_recipes(patient_id, recipes).await;
            (serde_json::to_string_pretty(&response)?, response.is_failure())
        }
    };

    println!("{body}");

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
