//! Text-entry forms for the planner screen
//!
//! A form is a list of labelled single-line fields with one focused field.
//! The details form and the activity form convert their text into typed
//! values when submitted.

use chrono::{NaiveDate, NaiveTime};

use crate::activities::ActivityType;
use crate::data::ActivityFields;
use crate::planner::TripFormValues;

/// One labelled text field
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
}

/// A focused list of text fields
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub focus: usize,
}

impl Form {
    fn new(fields: &[(&'static str, String)]) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|(label, value)| FormField {
                    label: *label,
                    value: value.clone(),
                })
                .collect(),
            focus: 0,
        }
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn insert(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }

    fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.trim()).unwrap_or("")
    }
}

fn parse_optional_date(label: &str, raw: &str) -> Result<Option<NaiveDate>, String> {
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| format!("{} must be YYYY-MM-DD", label))
}

fn parse_amount(label: &str, raw: &str) -> Result<f64, String> {
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| format!("{} must be a number", label))
}

const NAME: usize = 0;
const DESTINATION: usize = 1;
const START: usize = 2;
const END: usize = 3;
const BUDGET: usize = 4;

/// The trip details form
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsForm {
    pub form: Form,
}

impl DetailsForm {
    /// A form pre-filled from the given values.
    pub fn from_values(values: &TripFormValues) -> Self {
        let date = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();
        let budget = if values.budget == 0.0 {
            String::new()
        } else {
            values.budget.to_string()
        };
        Self {
            form: Form::new(&[
                ("Name", values.name.clone()),
                ("Destination", values.destination.clone()),
                ("Start date", date(values.start_date)),
                ("End date", date(values.end_date)),
                ("Budget", budget),
            ]),
        }
    }

    /// Converts the text into trip details.
    pub fn to_values(&self) -> Result<TripFormValues, String> {
        let f = &self.form;
        Ok(TripFormValues {
            name: f.value(NAME).to_string(),
            destination: f.value(DESTINATION).to_string(),
            start_date: parse_optional_date("Start date", f.value(START))?,
            end_date: parse_optional_date("End date", f.value(END))?,
            budget: parse_amount("Budget", f.value(BUDGET))?,
        })
    }
}

const A_NAME: usize = 0;
const A_TIME: usize = 1;
const A_DURATION: usize = 2;
const A_COST: usize = 3;
const A_LOCATION: usize = 4;
const A_NOTES: usize = 5;
const A_URL: usize = 6;

/// The new-activity form; the type is cycled rather than typed
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityForm {
    pub form: Form,
    pub activity_type: ActivityType,
    /// 0-based index of the day the activity goes into
    pub day_index: usize,
}

impl ActivityForm {
    pub fn new(day_index: usize) -> Self {
        Self {
            form: Form::new(&[
                ("Name", String::new()),
                ("Time (HH:MM)", String::new()),
                ("Duration (h)", String::new()),
                ("Cost", String::new()),
                ("Location", String::new()),
                ("Notes", String::new()),
                ("Link", String::new()),
            ]),
            activity_type: ActivityType::default(),
            day_index,
        }
    }

    pub fn cycle_type(&mut self) {
        self.activity_type = self.activity_type.next();
    }

    /// Converts the text into activity fields. The name is required.
    pub fn to_fields(&self) -> Result<ActivityFields, String> {
        let f = &self.form;
        let name = f.value(A_NAME);
        if name.is_empty() {
            return Err("Name is required".to_string());
        }
        let time = match f.value(A_TIME) {
            "" => None,
            raw => Some(
                NaiveTime::parse_from_str(raw, "%H:%M")
                    .map_err(|_| "Time must be HH:MM".to_string())?,
            ),
        };
        Ok(ActivityFields {
            name: name.to_string(),
            activity_type: self.activity_type,
            time,
            duration: parse_amount("Duration", f.value(A_DURATION))?,
            cost: parse_amount("Cost", f.value(A_COST))?,
            location: f.value(A_LOCATION).to_string(),
            notes: f.value(A_NOTES).to_string(),
            url: f.value(A_URL).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_into(form: &mut Form, text: &str) {
        for c in text.chars() {
            form.insert(c);
        }
    }

    #[test]
    fn test_focus_wraps_both_ways() {
        let mut form = ActivityForm::new(0).form;
        form.focus_prev();
        assert_eq!(form.focus, 6);
        form.focus_next();
        assert_eq!(form.focus, 0);
    }

    #[test]
    fn test_insert_and_backspace_edit_focused_field() {
        let mut form = ActivityForm::new(0).form;
        form.focus_next();
        type_into(&mut form, "10:300");
        form.backspace();
        assert_eq!(form.fields[1].value, "10:30");
        assert!(form.fields[0].value.is_empty());
    }

    #[test]
    fn test_details_form_round_trips_values() {
        let values = TripFormValues {
            name: "Iceland".to_string(),
            destination: "Reykjavik".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 9, 1),
            end_date: NaiveDate::from_ymd_opt(2025, 9, 8),
            budget: 2500.0,
        };
        let form = DetailsForm::from_values(&values);
        assert_eq!(form.form.fields[2].value, "2025-09-01");
        assert_eq!(form.to_values().unwrap(), values);
    }

    #[test]
    fn test_details_form_rejects_bad_date() {
        let mut form = DetailsForm::from_values(&TripFormValues::default());
        form.form.focus = 2;
        type_into(&mut form.form, "next week");
        assert_eq!(form.to_values().unwrap_err(), "Start date must be YYYY-MM-DD");
    }

    #[test]
    fn test_details_form_blank_fields_clear_values() {
        let form = DetailsForm::from_values(&TripFormValues::default());
        let values = form.to_values().unwrap();
        assert!(values.start_date.is_none());
        assert_eq!(values.budget, 0.0);
    }

    #[test]
    fn test_activity_form_requires_name() {
        let form = ActivityForm::new(0);
        assert_eq!(form.to_fields().unwrap_err(), "Name is required");
    }

    #[test]
    fn test_activity_form_parses_fields() {
        let mut activity = ActivityForm::new(2);
        type_into(&mut activity.form, "Museum");
        activity.form.focus = 1;
        type_into(&mut activity.form, "14:00");
        activity.form.focus = 2;
        type_into(&mut activity.form, "2");
        activity.form.focus = 4;
        type_into(&mut activity.form, "Rijksmuseum");
        activity.cycle_type();
        activity.cycle_type();

        let fields = activity.to_fields().unwrap();
        assert_eq!(fields.name, "Museum");
        assert_eq!(fields.time, NaiveTime::from_hms_opt(14, 0, 0));
        assert!((fields.duration - 2.0).abs() < f64::EPSILON);
        assert_eq!(fields.location, "Rijksmuseum");
        assert_eq!(fields.activity_type, ActivityType::Shopping);
        assert_eq!(activity.day_index, 2);
    }

    #[test]
    fn test_non_finite_amounts_are_rejected() {
        for raw in ["inf", "NaN", "-infinity"] {
            let mut activity = ActivityForm::new(0);
            type_into(&mut activity.form, "Dinner");
            activity.form.focus = 3;
            type_into(&mut activity.form, raw);
            assert_eq!(activity.to_fields().unwrap_err(), "Cost must be a number");

            let mut details = DetailsForm::from_values(&TripFormValues::default());
            details.form.focus = 4;
            type_into(&mut details.form, raw);
            assert_eq!(details.to_values().unwrap_err(), "Budget must be a number");
        }
    }

    #[test]
    fn test_activity_form_rejects_bad_cost() {
        let mut activity = ActivityForm::new(0);
        type_into(&mut activity.form, "Dinner");
        activity.form.focus = 3;
        type_into(&mut activity.form, "cheap");
        assert_eq!(activity.to_fields().unwrap_err(), "Cost must be a number");
    }
}
