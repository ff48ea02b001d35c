use chrono::NaiveDate;
use taskdeck_core::{
    Item, ItemFields, Priority, RecordValidationError, Template, TemplateFields,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

fn template(days_to_add: i64) -> Template {
    Template {
        id: 7,
        name: "Upcoming".to_string(),
        description: "Vacation".to_string(),
        priority: Priority::Low,
        days_to_add,
        is_active: true,
    }
}

#[test]
fn new_item_fields_start_open() {
    let fields = ItemFields::new("write tests", Priority::High, today());
    assert!(!fields.completed);
    assert!(fields.validate().is_ok());
}

#[test]
fn instantiate_copies_text_and_priority_and_shifts_deadline() {
    let fields = template(5).instantiate(today()).unwrap();

    assert_eq!(fields.description, "Vacation");
    assert_eq!(fields.priority, Priority::Low);
    assert_eq!(
        fields.deadline_date,
        NaiveDate::from_ymd_opt(2026, 10, 21).unwrap()
    );
    assert!(!fields.completed);
}

#[test]
fn instantiate_with_zero_days_is_due_today() {
    let fields = template(0).instantiate(today()).unwrap();
    assert_eq!(fields.deadline_date, today());
}

#[test]
fn instantiate_with_negative_days_backdates() {
    let fields = template(-16).instantiate(today()).unwrap();
    assert_eq!(
        fields.deadline_date,
        NaiveDate::from_ymd_opt(2026, 9, 30).unwrap()
    );
}

#[test]
fn instantiate_rejects_unrepresentable_deadlines() {
    let err = template(i64::MAX).instantiate(today()).unwrap_err();
    assert!(matches!(err, RecordValidationError::DeadlineOverflow { .. }));

    let err = template(3_000_000).instantiate(today()).unwrap_err();
    assert!(matches!(err, RecordValidationError::DeadlineOutOfRange(_)));
}

#[test]
fn template_fields_validate_offset_magnitude() {
    assert!(TemplateFields::new("n", "d", Priority::High, -3_652_058)
        .validate()
        .is_ok());
    assert_eq!(
        TemplateFields::new("n", "d", Priority::High, 3_652_059).validate(),
        Err(RecordValidationError::DaysToAddOutOfRange(3_652_059))
    );
}

#[test]
fn item_serialization_uses_expected_wire_fields() {
    let item = Item {
        id: 3,
        description: "Ship release".to_string(),
        priority: Priority::High,
        deadline_date: today(),
        completed: true,
        is_active: true,
    };

    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["id"], 3);
    assert_eq!(json["priority"], "high");
    assert_eq!(json["deadline_date"], "2026-10-16");
    assert_eq!(json["completed"], true);

    let decoded: Item = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, item);
}

#[test]
fn days_until_deadline_is_signed() {
    let mut item = Item {
        id: 1,
        description: String::new(),
        priority: Priority::Medium,
        deadline_date: NaiveDate::from_ymd_opt(2026, 10, 23).unwrap(),
        completed: false,
        is_active: true,
    };
    assert_eq!(item.days_until_deadline(today()), 7);

    item.deadline_date = NaiveDate::from_ymd_opt(2026, 10, 13).unwrap();
    assert_eq!(item.days_until_deadline(today()), -3);
}
