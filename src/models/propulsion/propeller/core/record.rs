//! Construction of a [`StaticPropeller`] from reference table records.
//!
//! Records hold the fields `Name`, `Dia`, `Pitch`, `b`, `d`, `n10N` and
//! `n100W`. The coefficients `a` and `c` are always derived from the
//! reference speeds and exponents. Any `a` or `c` stored in the record is
//! not read, since the units those columns were written in are unknown.

use tracing::debug;
use uom::si::{f64::Length, length::inch};

use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    table::{NAME_FIELD, Record, RecordError, Table},
};

use super::{Axis, Characteristic, Provenance, StaticPropeller};

const DIAMETER_FIELD: &str = "Dia";
const PITCH_FIELD: &str = "Pitch";
const THRUST_EXPONENT_FIELD: &str = "b";
const POWER_EXPONENT_FIELD: &str = "d";
const SPEED_AT_10N_FIELD: &str = "n10N";
const SPEED_AT_100W_FIELD: &str = "n100W";

impl StaticPropeller {
    /// Loads the propeller whose identifier is `id` from a reference table.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::NotFound`] or [`RecordError::MultipleRecords`]
    /// unless exactly one record has the identifier, and any error of
    /// [`from_record`](Self::from_record).
    pub fn from_table(table: &Table, id: i64) -> Result<Self, RecordError> {
        Self::from_record(table.get_by_id(id)?)
    }

    /// Loads the propeller named `name` from a reference table.
    ///
    /// # Errors
    ///
    /// Same as [`from_table`](Self::from_table), keyed by name.
    pub fn from_table_by_name(table: &Table, name: &str) -> Result<Self, RecordError> {
        Self::from_record(table.get_by_name(name)?)
    }

    /// Builds a propeller from one reference record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::MissingField`] if a required field is absent and
    /// [`RecordError::InvalidField`] if a field has the wrong type, an
    /// exponent is not finite, or a length or reference speed is not
    /// strictly positive.
    pub fn from_record(record: &Record) -> Result<Self, RecordError> {
        let name = record.text(NAME_FIELD)?.to_owned();

        let diameter = length(record, DIAMETER_FIELD)?;
        let pitch = length(record, PITCH_FIELD)?;
        let thrust_exponent = finite(record, THRUST_EXPONENT_FIELD)?;
        let power_exponent = finite(record, POWER_EXPONENT_FIELD)?;
        let speed_at_10n = positive(record, SPEED_AT_10N_FIELD)?;
        let speed_at_100w = positive(record, SPEED_AT_100W_FIELD)?;

        debug!(
            propeller = %name,
            n10n = speed_at_10n,
            b = thrust_exponent,
            n100w = speed_at_100w,
            d = power_exponent,
            "loaded propeller record"
        );

        Ok(Self {
            name,
            diameter,
            pitch,
            thrust: Characteristic::from_reference_speed(
                Axis::Thrust,
                speed_at_10n,
                thrust_exponent,
                Provenance::Record,
            ),
            power: Characteristic::from_reference_speed(
                Axis::Power,
                speed_at_100w,
                power_exponent,
                Provenance::Record,
            ),
        })
    }
}

fn positive(record: &Record, field: &str) -> Result<f64, RecordError> {
    StrictlyPositive::new(record.real(field)?)
        .map(Constrained::into_inner)
        .map_err(|err| RecordError::invalid_field(field, err))
}

fn finite(record: &Record, field: &str) -> Result<f64, RecordError> {
    let value = record.real(field)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RecordError::invalid_field(field, "value is not finite"))
    }
}

/// Reads a length recorded in inches.
fn length(record: &Record, field: &str) -> Result<Constrained<Length, StrictlyPositive>, RecordError> {
    StrictlyPositive::new(Length::new::<inch>(record.real(field)?))
        .map_err(|err| RecordError::invalid_field(field, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        angular_velocity::revolution_per_minute, f64::AngularVelocity, force::newton, power::watt,
    };

    use crate::support::table::{FieldValue, ID_FIELD, RecordKey};

    fn apc_10x7(id: i64) -> Record {
        Record::from_iter([
            (ID_FIELD, FieldValue::from(id)),
            (NAME_FIELD, "APC 10x7 E".into()),
            (DIAMETER_FIELD, 10.0.into()),
            (PITCH_FIELD, 7.0.into()),
            (THRUST_EXPONENT_FIELD, 2.05.into()),
            (POWER_EXPONENT_FIELD, 3.1.into()),
            (SPEED_AT_10N_FIELD, 7450.0.into()),
            (SPEED_AT_100W_FIELD, FieldValue::Integer(6200)),
            // Unreliable coefficients that must be ignored.
            ("a", 1.0.into()),
            ("c", 2.0.into()),
        ])
    }

    fn table() -> Table {
        [apc_10x7(7), apc_10x7(3)].into_iter().collect()
    }

    #[test]
    fn loads_record_by_id() {
        let propeller = StaticPropeller::from_table(&table(), 7).unwrap();

        assert_eq!(propeller.name(), "APC 10x7 E");
        assert_relative_eq!(propeller.diameter().get::<inch>(), 10.0, max_relative = 1e-12);
        assert_relative_eq!(propeller.pitch().get::<inch>(), 7.0, max_relative = 1e-12);

        assert_relative_eq!(propeller.thrust_law().exponent, 2.05);
        assert_relative_eq!(propeller.power_law().exponent, 3.1);
        assert_relative_eq!(
            propeller.thrust_law().coefficient,
            10.0 / 7450.0_f64.powf(2.05),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            propeller.power_law().coefficient,
            100.0 / 6200.0_f64.powf(3.1),
            max_relative = 1e-12
        );

        assert_eq!(
            propeller.thrust_characteristic().provenance(),
            Provenance::Record
        );
        assert!(!propeller.is_power_fitted());
    }

    #[test]
    fn record_invariants_hold() {
        let propeller = StaticPropeller::from_table(&table(), 7).unwrap();

        let n10n = AngularVelocity::new::<revolution_per_minute>(7450.0);
        let n100w = AngularVelocity::new::<revolution_per_minute>(6200.0);

        assert_relative_eq!(
            propeller.thrust(n10n).get::<newton>(),
            10.0,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            propeller.shaft_power(n100w).get::<watt>(),
            100.0,
            max_relative = 1e-9
        );
    }

    #[test]
    fn loads_record_by_name() {
        let table: Table = [apc_10x7(1)].into_iter().collect();
        let propeller = StaticPropeller::from_table_by_name(&table, "APC 10x7 E").unwrap();
        assert_eq!(propeller.name(), "APC 10x7 E");

        // Same name twice is ambiguous.
        assert!(matches!(
            StaticPropeller::from_table_by_name(&self::table(), "APC 10x7 E"),
            Err(RecordError::MultipleRecords { count: 2, .. })
        ));
    }

    #[test]
    fn missing_id_is_not_found() {
        assert_eq!(
            StaticPropeller::from_table(&table(), 99),
            Err(RecordError::NotFound {
                key: RecordKey::Id(99)
            })
        );
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let table: Table = [apc_10x7(7), apc_10x7(7)].into_iter().collect();

        assert_eq!(
            StaticPropeller::from_table(&table, 7),
            Err(RecordError::MultipleRecords {
                key: RecordKey::Id(7),
                count: 2,
            })
        );
    }

    #[test]
    fn missing_field_is_reported() {
        let full = apc_10x7(7);
        let record: Record = [NAME_FIELD, DIAMETER_FIELD, PITCH_FIELD, THRUST_EXPONENT_FIELD]
            .into_iter()
            .filter_map(|field| full.get(field).cloned().map(|value| (field, value)))
            .collect();

        assert_eq!(
            StaticPropeller::from_record(&record),
            Err(RecordError::MissingField {
                field: POWER_EXPONENT_FIELD.into()
            })
        );
    }

    #[test]
    fn non_positive_reference_speed_is_invalid() {
        let mut record = apc_10x7(7);
        record.insert(SPEED_AT_10N_FIELD, 0.0.into());

        assert!(matches!(
            StaticPropeller::from_record(&record),
            Err(RecordError::InvalidField { field, .. }) if field == SPEED_AT_10N_FIELD
        ));
    }

    #[test]
    fn negative_pitch_is_invalid() {
        let mut record = apc_10x7(7);
        record.insert(PITCH_FIELD, (-7.0).into());

        assert!(matches!(
            StaticPropeller::from_record(&record),
            Err(RecordError::InvalidField { field, .. }) if field == PITCH_FIELD
        ));
    }

    #[test]
    fn non_finite_exponent_is_invalid() {
        let mut record = apc_10x7(7);
        record.insert(POWER_EXPONENT_FIELD, f64::NAN.into());

        assert!(matches!(
            StaticPropeller::from_record(&record),
            Err(RecordError::InvalidField { field, .. }) if field == POWER_EXPONENT_FIELD
        ));
    }
}
