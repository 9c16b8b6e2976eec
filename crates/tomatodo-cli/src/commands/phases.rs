//! Print the repetition-to-phase table.

use tomatodo_core::Phase;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("rep  phase        duration");
    for repetition in 1..=8u32 {
        let phase = Phase::for_repetition(repetition);
        println!(
            "{:<4} {:<12} {} min",
            repetition,
            phase.label(),
            phase.duration_min()
        );
    }
    println!();
    println!("The long break fires only at repetition 8; past that the cycle");
    println!("alternates work and short breaks until reset.");
    Ok(())
}
