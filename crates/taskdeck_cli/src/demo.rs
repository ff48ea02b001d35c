//! Demo data seeding for empty or throwaway stores.

use log::info;
use rand::prelude::IndexedRandom;
use rand::Rng;
use taskdeck_core::{
    shift_date, Clock, ItemFields, ItemRepository, ItemService, Priority, RepoResult,
    TemplateFields, TemplateRepository, TemplateService,
};

const VERBS: &[&str] = &[
    "Review",
    "Design",
    "Code",
    "Test",
    "Develop",
    "Refactor",
    "Update",
    "Build",
    "Publish",
    "Investigate",
];

const OBJECTS: &[&str] = &[
    "minimum viable product",
    "work from last week",
    "thing your boss just mentioned",
    "database scripts",
    "important functionality",
    "first sprint item",
    "demoable product",
];

/// Day offsets drawn from `0..10`; values from here up land in the past.
const PAST_OFFSET_START: i64 = 8;

/// Creates `count` random items followed by three stock templates.
///
/// Roughly one item in seven is marked completed right after creation.
pub fn seed_demo_data<IR, TR, C, G>(
    items: &ItemService<IR, C>,
    templates: &TemplateService<TR>,
    count: usize,
    rng: &mut G,
) -> RepoResult<()>
where
    IR: ItemRepository,
    TR: TemplateRepository,
    C: Clock,
    G: Rng,
{
    let today = items.today();
    for _ in 0..count {
        let verb = VERBS.choose(rng).copied().unwrap_or("Review");
        let object = OBJECTS.choose(rng).copied().unwrap_or("work from last week");
        let priority = Priority::ALL
            .choose(rng)
            .copied()
            .unwrap_or(Priority::Medium);

        let roll = rng.random_range(0..10_i64);
        let offset = if roll < PAST_OFFSET_START {
            roll
        } else {
            roll - 10
        };
        let deadline = shift_date(today, offset)?;

        let id = items.create_item(&ItemFields::new(
            format!("{verb} the {object}"),
            priority,
            deadline,
        ))?;
        if rng.random_range(0..100) > 85 {
            items.toggle_completed(id)?;
        }
    }

    for fields in stock_templates() {
        templates.create_template(&fields)?;
    }

    info!("event=demo_seed module=cli status=ok items={count} templates=3");
    Ok(())
}

fn stock_templates() -> [TemplateFields; 3] {
    [
        TemplateFields::new("Today/High", "DEADLINE TODAY!! ", Priority::High, 0),
        TemplateFields::new("Tomorrow/Medium", "Demo tomorrow", Priority::Medium, 1),
        TemplateFields::new("Upcoming", "Vacation", Priority::Low, 5),
    ]
}
