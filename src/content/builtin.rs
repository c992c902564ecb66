//! Built-in engine bay module
//!
//! The same course ships as `data/engine_bay.toml`; this copy lets the
//! player start without any content file.

use crate::content::chapter::{Chapter, Interaction, Module};
use crate::content::task::{ChoiceTask, ClickTask, Task, TerminalTask};
use crate::hotspot::{Hotspot, HotspotLayer, HotspotShape};
use glam::Vec2;

fn click(id: &str, instruction: &str, target: &str, success: &str, error: &str) -> Task {
    Task::Click(ClickTask {
        id: id.into(),
        instruction: instruction.into(),
        correct_target: target.into(),
        success_message: success.into(),
        error_message: error.into(),
    })
}

fn choice(
    id: &str,
    question: &str,
    options: &[&str],
    correct: &[usize],
    success: &str,
    error: &str,
) -> Task {
    Task::Choice(ChoiceTask {
        id: id.into(),
        question: question.into(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answers: correct.iter().map(|&i| options[i].to_string()).collect(),
        success_message: success.into(),
        error_message: error.into(),
    })
}

fn poly(points: &[(f32, f32)]) -> HotspotShape {
    HotspotShape::Poly {
        points: points.iter().map(|&(x, y)| Vec2::new(x, y)).collect(),
    }
}

/// Hotspots over the 700x439 engine bay photo
pub fn engine_bay_hotspots() -> HotspotLayer {
    HotspotLayer {
        width: 700.0,
        height: 439.0,
        hotspots: vec![
            Hotspot {
                id: "engine".into(),
                label: Some("Engine".into()),
                shape: poly(&[
                    (215.0, 160.0),
                    (360.0, 135.0),
                    (425.0, 165.0),
                    (430.0, 260.0),
                    (390.0, 295.0),
                    (240.0, 295.0),
                    (200.0, 230.0),
                ]),
            },
            Hotspot {
                id: "battery".into(),
                label: Some("Battery".into()),
                shape: poly(&[
                    (462.0, 236.0),
                    (569.0, 236.0),
                    (578.0, 286.0),
                    (575.0, 300.0),
                    (466.0, 300.0),
                    (458.0, 286.0),
                ]),
            },
        ],
    }
}

/// Engine bay basics and safety
pub fn engine_bay() -> Module {
    Module {
        title: "Engine bay basics and safety".into(),
        hotspots: Some(engine_bay_hotspots()),
        chapters: vec![
            Chapter {
                id: "intro".into(),
                title: "Introduction".into(),
                context: "This module is about the engine bay and what can we find in it.".into(),
                interaction: Interaction::Hotspots,
                tasks: vec![
                    click(
                        "step1",
                        "Click on the Battery",
                        "battery",
                        "Correct! That is the battery.",
                        "That is not the battery. Try again.",
                    ),
                    click(
                        "step2",
                        "Click on the Engine",
                        "engine",
                        "Correct! That is the engine.",
                        "That is not the engine. Try again.",
                    ),
                ],
            },
            Chapter {
                id: "safety".into(),
                title: "Safety and preparation".into(),
                context: "Before working in the engine bay, you must make the area safe. \
                          In this chapter you will answer safety questions about working \
                          around the battery and engine components."
                    .into(),
                interaction: Interaction::Hotspots,
                tasks: vec![
                    choice(
                        "safety-q1",
                        "Which of the following should you do before working on a vehicle's battery?",
                        &[
                            "Turn off the ignition and remove the key.",
                            "Disconnect the negative terminal first.",
                            "Wear appropriate eye protection.",
                            "Touch both terminals with a metal tool to test voltage.",
                        ],
                        &[0, 1, 2],
                        "Correct. Switch off the ignition, wear protection, and disconnect the negative terminal first.",
                        "Not quite. Think about ignition status, PPE, and the correct disconnection order.",
                    ),
                    choice(
                        "safety-q2",
                        "Why is the negative terminal disconnected first when removing a battery?",
                        &[
                            "To reduce the risk of short circuits.",
                            "Because the negative cable is always shorter.",
                            "To prevent accidental sparking if a tool touches the chassis.",
                            "Because it improves battery performance.",
                        ],
                        &[0, 2],
                        "Correct. Disconnecting negative first reduces short-circuit risk.",
                        "Incorrect. Think about grounding and short circuits.",
                    ),
                    choice(
                        "safety-q3",
                        "Which hazards are present in an engine bay?",
                        &[
                            "Hot surfaces such as the engine block.",
                            "Moving components like belts and fans.",
                            "Pressurized fluids.",
                            "Decorative plastic covers.",
                        ],
                        &[0, 1, 2],
                        "Correct. Engine bays contain heat, moving parts, and pressurized systems.",
                        "Not quite. Consider mechanical, thermal, and fluid risks.",
                    ),
                ],
            },
            Chapter {
                id: "battery-removal".into(),
                title: "Battery removal".into(),
                context: "To safely remove a battery, disconnect the negative terminal first. \
                          This reduces the risk of short circuits. After the negative cable is \
                          disconnected, disconnect the positive terminal."
                    .into(),
                interaction: Interaction::CableDrag,
                tasks: vec![
                    click(
                        "bat-step1",
                        "Disconnect the negative terminal (drag the negative cable off the terminal).",
                        "negative",
                        "Well done. The negative terminal is disconnected.",
                        "Not quite. Disconnect the negative terminal first.",
                    ),
                    click(
                        "bat-step2",
                        "Disconnect the positive terminal (drag the positive cable off the terminal).",
                        "positive",
                        "Well done. The positive terminal is disconnected.",
                        "Not quite. Disconnect the positive terminal.",
                    ),
                ],
            },
            Chapter {
                id: "complete".into(),
                title: "Module complete".into(),
                context: "You have finished the engine bay basics module.".into(),
                interaction: Interaction::Hotspots,
                tasks: vec![Task::Terminal(TerminalTask {
                    id: "done".into(),
                    title: "Well done!".into(),
                    body: "You identified the main engine bay components, answered the safety \
                           questions and removed the battery in the correct order."
                        .into(),
                })],
            },
        ],
    }
}
