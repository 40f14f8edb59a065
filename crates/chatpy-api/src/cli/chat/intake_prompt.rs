//! Terminal rendition of the two-step intake form.
//!
//! Collects field values with dialoguer prompts and hands them to the widget
//! as `NextStep` / `PrevStep` / `SubmitIntake` events. Validation and
//! submission stay in the widget core; this module only gathers input.

use anyhow::Result;
use dialoguer::{Confirm, Input, Select};

use chatpy_core::backend::ChatBackend;
use chatpy_core::widget::{ChatWidget, WidgetEvent};
use chatpy_types::chat::SessionPhase;
use chatpy_types::intake::{IntakeRecord, IntakeStep};

use super::terminal_view::TerminalView;

/// How the intake ended.
#[derive(Debug, PartialEq, Eq)]
pub enum IntakeOutcome {
    /// A session is active.
    Accepted,
    /// The user gave up.
    Abandoned,
}

fn text(prompt: &str, initial: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(format!("  {prompt}"))
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

/// Ask the step-1 questions, pre-filled with earlier answers.
fn prompt_details(record: &mut IntakeRecord) -> Result<()> {
    record.full_name = text("Full name", &record.full_name)?;
    record.email = text("Email", &record.email)?;

    let options = ["yes", "no"];
    let default = options
        .iter()
        .position(|o| *o == record.international)
        .unwrap_or(1);
    let choice = Select::new()
        .with_prompt("  International student?")
        .items(&options)
        .default(default)
        .interact()?;
    record.international = options[choice].to_string();

    record.student_category = text("Student category (e.g. High School)", &record.student_category)?;
    record.student_type = text("Student type (e.g. New, Returning)", &record.student_type)?;
    Ok(())
}

fn prompt_school(record: &mut IntakeRecord) -> Result<()> {
    record.grade = text("Grade", &record.grade)?;
    record.province = text("Province", &record.province)?;
    record.school_name = text("School name", &record.school_name)?;
    record.student_number = text("Student number", &record.student_number)?;
    Ok(())
}

/// Run the intake form until a session is active or the user abandons it.
pub async fn run_intake<B: ChatBackend>(
    widget: &mut ChatWidget<B, TerminalView>,
) -> Result<IntakeOutcome> {
    let mut record = IntakeRecord::default();
    widget.dispatch(WidgetEvent::OpenIntake).await;

    loop {
        match widget.intake().step() {
            IntakeStep::Details => {
                prompt_details(&mut record)?;
                widget.dispatch(WidgetEvent::NextStep(record.clone())).await;
                if widget.intake().step() == IntakeStep::Details {
                    continue;
                }
            }
            IntakeStep::School => {
                prompt_school(&mut record)?;
                let actions = ["Submit", "Back", "Cancel"];
                let action = Select::new()
                    .with_prompt("  Ready?")
                    .items(&actions)
                    .default(0)
                    .interact()?;

                match action {
                    0 => {
                        widget
                            .dispatch(WidgetEvent::SubmitIntake(record.clone()))
                            .await;
                        if widget.controller().phase() == SessionPhase::Active {
                            return Ok(IntakeOutcome::Accepted);
                        }
                        let retry = Confirm::new()
                            .with_prompt("  Try again?")
                            .default(true)
                            .interact()?;
                        if !retry {
                            widget.dispatch(WidgetEvent::CloseIntake).await;
                            return Ok(IntakeOutcome::Abandoned);
                        }
                    }
                    1 => {
                        widget.dispatch(WidgetEvent::PrevStep).await;
                    }
                    _ => {
                        widget.dispatch(WidgetEvent::CloseIntake).await;
                        return Ok(IntakeOutcome::Abandoned);
                    }
                }
            }
        }
    }
}
