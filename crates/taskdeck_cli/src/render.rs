//! Plain-text rendering for items, templates and the workload histogram.

use taskdeck_core::{Item, Priority, Template, WorkloadHistogram, HISTOGRAM_BUCKETS};

pub const HELP: &str = "(1) to read future items
(2) to read past items
(3) to read templates
(c)reate or (u)pdate, (d)elete or (s)tatus followed by id for items
(ct)reate or (ut)pdate or (dt)elete followed by id for templates
(ct)reate followed by id for creating an item from a template
(h)istogram for histogram of upcoming tasks
(q)uit or e(x)it to exit";

pub fn item_line(item: &Item) -> String {
    format!(
        "{} - Id :{} - Description: {} - Priority: {} - Completed: {}",
        item.deadline_date.format("%Y-%m-%d"),
        item.id,
        item.description,
        item.priority.label(),
        item.completed
    )
}

pub fn template_line(template: &Template) -> String {
    format!(
        "Id: {} - Name: {} - Days from today: {} - Description: {} - Priority: {}",
        template.id,
        template.name,
        template.days_to_add,
        template.description,
        template.priority.label()
    )
}

/// One line per bucket: date, a `+` marker on the open-ended bucket, then
/// `H`/`M`/`L` repeated by count.
pub fn histogram_lines(histogram: &WorkloadHistogram) -> Vec<String> {
    let mut lines = Vec::with_capacity(HISTOGRAM_BUCKETS);
    for (index, counts) in histogram.buckets().iter().enumerate() {
        let mut line = histogram
            .bucket_date(index)
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        line.push_str(if WorkloadHistogram::is_open_ended(index) {
            "+ "
        } else {
            "  "
        });
        for (priority, mark) in [
            (Priority::High, "H"),
            (Priority::Medium, "M"),
            (Priority::Low, "L"),
        ] {
            line.push_str(&mark.repeat(counts.get(priority)));
        }
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::{histogram_lines, item_line, template_line};
    use chrono::{Days, NaiveDate};
    use taskdeck_core::{Item, Priority, Template, WorkloadHistogram};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn item(id: i64, days: u64, priority: Priority) -> Item {
        Item {
            id,
            description: "Review the database scripts".to_string(),
            priority,
            deadline_date: today() + Days::new(days),
            completed: false,
            is_active: true,
        }
    }

    #[test]
    fn renders_item_line() {
        assert_eq!(
            item_line(&item(3, 0, Priority::High)),
            "2026-10-16 - Id :3 - Description: Review the database scripts - Priority: HIGH - Completed: false"
        );
    }

    #[test]
    fn renders_template_line() {
        let template = Template {
            id: 2,
            name: "Tomorrow/Medium".to_string(),
            description: "Demo tomorrow".to_string(),
            priority: Priority::Medium,
            days_to_add: 1,
            is_active: true,
        };
        assert_eq!(
            template_line(&template),
            "Id: 2 - Name: Tomorrow/Medium - Days from today: 1 - Description: Demo tomorrow - Priority: MEDIUM"
        );
    }

    #[test]
    fn renders_histogram_rows_high_to_low() {
        let items = vec![
            item(1, 0, Priority::Low),
            item(2, 0, Priority::High),
            item(3, 0, Priority::Medium),
            item(4, 9, Priority::High),
        ];
        let lines = histogram_lines(&WorkloadHistogram::from_items(today(), &items));

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "2026-10-16  HML");
        assert_eq!(lines[1], "2026-10-17  ");
        assert_eq!(lines[7], "2026-10-23+ H");
    }
}
