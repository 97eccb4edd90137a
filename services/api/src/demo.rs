use crate::infra::{InMemoryAssessmentRepository, InMemoryCrisisAlertPublisher};
use clap::Args;
use mindline::assessments::{
    AssessmentService, AssessmentType, ItemResponse, TriggerDecision,
};
use mindline::conversation;
use mindline::error::AppError;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct TriageArgs {
    /// User the message belongs to
    #[arg(long, default_value_t = 1)]
    pub(crate) user_id: i64,
    /// Message text to scan for assessment triggers
    #[arg(long)]
    pub(crate) message: String,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// User id used throughout the demo
    #[arg(long, default_value_t = 1)]
    pub(crate) user_id: i64,
    /// Override the demo's opening message
    #[arg(long)]
    pub(crate) message: Option<String>,
    /// Skip the questionnaire submission portion of the demo
    #[arg(long)]
    pub(crate) skip_submission: bool,
}

type DemoService = AssessmentService<InMemoryAssessmentRepository, InMemoryCrisisAlertPublisher>;

fn build_service() -> (DemoService, Arc<InMemoryCrisisAlertPublisher>) {
    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let alerts = Arc::new(InMemoryCrisisAlertPublisher::default());
    let service = AssessmentService::new(repository, alerts.clone());
    (service, alerts)
}

pub(crate) fn run_triage(args: TriageArgs) -> Result<(), AppError> {
    let (service, _) = build_service();

    let decisions = service.evaluate_message(args.user_id, &args.message);
    let candidates: Vec<_> = decisions
        .iter()
        .map(|decision| decision.candidate)
        .collect();
    let route = conversation::route(&args.message, &candidates);

    println!("Message triage for user {}", args.user_id);
    render_decisions(&decisions);
    println!("Conversation route: {}", route.label());

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        user_id,
        message,
        skip_submission,
    } = args;

    let message = message.unwrap_or_else(|| {
        "I've been feeling hopeless lately and I worry about everything".to_string()
    });
    let (service, alerts) = build_service();

    println!(
        "Mindline assessment demo ({})",
        chrono::Local::now().format("%Y-%m-%d")
    );
    println!("\nStep 1: triage the opening message");
    println!("  \"{message}\"");
    let decisions = service.evaluate_message(user_id, &message);
    render_decisions(&decisions);

    if !skip_submission {
        println!("\nStep 2: complete the first triggered questionnaire");
        let assessment_type = decisions
            .iter()
            .find(|decision| decision.triggered)
            .map(|decision| decision.candidate.assessment_type)
            .unwrap_or(AssessmentType::Phq9);
        let record = service.submit(
            user_id,
            assessment_type,
            "demo",
            sample_responses(assessment_type),
        )?;
        println!(
            "- {} scored {} ({})",
            record.assessment_type, record.result.total_score, record.result.severity_level
        );
        for recommendation in &record.result.recommendations {
            println!("  - {recommendation}");
        }
        println!(
            "- next administration due {}",
            record.result.next_assessment_due.format("%Y-%m-%d")
        );
    }

    println!("\nStep 3: roll up the user's current state");
    let summary = service.summary(user_id)?;
    println!("- overall risk: {}", summary.overall_risk.label());
    for (instrument, severity) in &summary.severity_levels {
        println!("- {instrument}: {severity}");
    }
    let due = service.due(user_id)?;
    let due_labels: Vec<_> = due.iter().map(|assessment| assessment.label()).collect();
    println!("- still due: {}", due_labels.join(", "));
    println!("- crisis alerts raised: {}", alerts.events().len());

    Ok(())
}

fn render_decisions(decisions: &[TriggerDecision]) {
    if decisions.is_empty() {
        println!("- no assessment candidates detected");
        return;
    }
    for decision in decisions {
        let verdict = if decision.triggered {
            "trigger"
        } else {
            "hold"
        };
        println!(
            "- {} ({}, signal {}): {} [{}]",
            decision.candidate.assessment_type,
            decision.candidate.reason.label(),
            decision.candidate.severity,
            verdict,
            decision.rule
        );
    }
}

/// Canned mid-range answers so the demo exercises a realistic moderate
/// result rather than an empty questionnaire.
fn sample_responses(assessment_type: AssessmentType) -> Vec<ItemResponse> {
    let scores: &[u8] = match assessment_type {
        AssessmentType::Phq9 => &[2, 2, 1, 2, 1, 1, 1, 1, 0],
        AssessmentType::Gad7 => &[2, 2, 1, 1, 1, 1, 0],
        AssessmentType::Columbia => &[1, 0, 0, 0, 0, 0],
    };

    assessment_type
        .expected_ids()
        .zip(scores.iter().copied())
        .map(|(id, score)| ItemResponse::new(id, score))
        .collect()
}
