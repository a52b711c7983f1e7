use chrono::Utc;
use civtime::{DateTime, TimeSpan};
use tracing_subscriber::EnvFilter;

fn main() -> civtime::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let now = DateTime::now();
    let deadline = DateTime::from_ymd_hms(2024, 1, 31, 17, 0, 0)?;
    let next_month = deadline.add_months(1)?;

    println!("now (local):  {now}");
    println!("now (UTC):    {}", now.with_zone(Utc));
    println!("deadline:     {deadline}");
    println!("+1 month:     {}", next_month.format("%A %e %B %Y, %H:%M")?);
    println!("elapsed:      {:.1} days", (now - deadline).total_days());
    println!("in 90 min:    {}", now + TimeSpan::from_minutes(90.0));
    Ok(())
}
