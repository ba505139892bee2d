use rewardquest_core::{AlarmSynthesizer, Config, Tone};

/// Audio check: unlike the countdown, this reports playback failures.
pub async fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut alarm = AlarmSynthesizer::new(Tone::from(&config.alarm));
    alarm.try_play()?;
    // Keep the output alive until the tone has finished.
    tokio::time::sleep(Tone::default().stop + std::time::Duration::from_millis(100)).await;
    println!("ok");
    Ok(())
}
