use chrono::{Local, Timelike};
use puppy_core::{derive_default_activity, Activity, DAY_PLAN};

pub fn run(hour: Option<u32>) -> puppy_core::Result<()> {
    if let Some(hour) = hour {
        println!("{}", Activity::try_for_hour(hour)?);
        return Ok(());
    }

    let now = Local::now();
    let current = now.hour();
    for line in plan_lines(current) {
        println!("{line}");
    }
    println!("now: {}", derive_default_activity(&now));
    Ok(())
}

/// One line per plan slot in clock order, the slot containing `current`
/// marked with `*`.
fn plan_lines(current: u32) -> Vec<String> {
    let mut slots: Vec<_> = DAY_PLAN.iter().cloned().collect();
    slots.sort_by_key(|(hours, _)| hours.start);
    slots
        .into_iter()
        .map(|(hours, activity)| {
            let marker = if hours.contains(&current) { "*" } else { " " };
            format!(
                "{marker} {:02}:00-{:02}:00  {}",
                hours.start,
                hours.end,
                activity.label()
            )
        })
        .collect()
}
