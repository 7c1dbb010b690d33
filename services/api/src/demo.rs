use crate::infra::{load_library, parse_mode};
use clap::Args;
use matchmaker::error::AppError;
use matchmaker::workflows::evaluation::{evaluate, EvaluationResult, RequirementMode};
use matchmaker::workflows::library::{BoundCase, CaseDocument};
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Only evaluate under this requirement mode (defaults to all three).
    #[arg(long, value_parser = parse_mode)]
    pub(crate) mode: Option<RequirementMode>,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Case file holding the candidate profile and client criteria (JSON)
    #[arg(long)]
    pub(crate) case: PathBuf,
    /// Trait catalog to bind names against (defaults to the bundled catalog)
    #[arg(long)]
    pub(crate) library: Option<PathBuf>,
    /// Requirement mode (explicit_threshold, implicit_softening, scoring_only)
    #[arg(long, value_parser = parse_mode)]
    pub(crate) mode: Option<RequirementMode>,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        case,
        library,
        mode,
    } = args;

    let library = load_library(library.as_deref())?;
    let document = CaseDocument::from_path(&case)?;
    let bound = library.bind_case(&document)?;
    let mode = mode.unwrap_or_default();

    let result = evaluate(&bound.profile, &bound.criteria, mode)?;
    print!("{}", render_evaluation(&bound, mode, &result));
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let library = load_library(None)?;
    let bound = library.bind_case(&CaseDocument::demo()?)?;
    let modes = match args.mode {
        Some(mode) => vec![mode],
        None => RequirementMode::ordered().to_vec(),
    };

    println!("Matchmaker demo");
    println!(
        "Candidate {} ({}, {}) with {} posts",
        bound.profile.display_name,
        bound.profile.gender,
        bound.profile.age,
        bound.profile.guaranteed_posts.len()
    );
    for requirement in &bound.criteria.requirements {
        println!(
            "  - {:?}: {}",
            requirement.level,
            requirement.description()
        );
    }

    for mode in modes {
        let result = evaluate(&bound.profile, &bound.criteria, mode)?;
        println!();
        print!("{}", render_evaluation(&bound, mode, &result));
    }

    Ok(())
}

pub(crate) fn render_evaluation(
    case: &BoundCase,
    mode: RequirementMode,
    result: &EvaluationResult,
) -> String {
    let mut out = String::new();
    let verdict = if result.is_match { "MATCH" } else { "NO MATCH" };
    let _ = writeln!(
        out,
        "[{mode}] {} -> {verdict}",
        case.profile.display_name
    );

    if result.is_match {
        let b = &result.breakdown;
        let _ = writeln!(out, "  Score: {:.1}", result.score);
        let _ = writeln!(
            out,
            "  Categories: personality {:.0} x {:.2} | interests {:.0} x {:.2} | lifestyle {:.0} x {:.2}",
            b.personality_score,
            b.personality_weight,
            b.interest_score,
            b.interest_weight,
            b.lifestyle_score,
            b.lifestyle_weight
        );
        let _ = writeln!(
            out,
            "  Base {:.1} | weighted sum {:.1} | preferred +{:.1} | avoid -{:.1} | required +{:.1} / -{:.1} | age -{:.1}",
            b.base_score,
            b.weighted_sum,
            b.preferred_bonus,
            b.avoid_penalty,
            b.required_bonus,
            b.required_penalty,
            b.age_penalty
        );
    } else {
        let _ = writeln!(out, "  Reason: {}", result.failure_summary());
    }

    let _ = writeln!(
        out,
        "  Flags: {} red / {} green",
        result.red_flag_count, result.green_flag_count
    );
    for (label, items) in [
        ("Required met", &result.met_requirements),
        ("Required failed", &result.failed_requirements),
        ("Preferred met", &result.preferred_met),
        ("Avoid matched", &result.avoid_matched),
    ] {
        if !items.is_empty() {
            let _ = writeln!(out, "  {label}: {}", items.join("; "));
        }
    }

    out
}
