use rewardquest_core::{format_mmss, parse_time_input};

pub fn run(input: &str) -> Result<(), Box<dyn std::error::Error>> {
    let secs = parse_time_input(input)?;
    println!("{secs}\t{}", format_mmss(secs));
    Ok(())
}
