// tests/reserved_fields_test.rs

use espressors_namelist::fields::assign;
use espressors_namelist::{
    FlatNamelist, Namelist, NamelistError, ReservedFields, Result, Transform, TransformOptions,
    Value,
};
use linked_hash_map::LinkedHashMap;
use std::any::Any;

/// Declared fields of a pw.x `&control` group.
#[derive(Debug, Clone, Default)]
struct Control {
    calculation: Option<String>,
    nstep: Option<i64>,
    prefix: Option<String>,
}

impl ReservedFields for Control {
    fn field_names(&self) -> &'static [&'static str] {
        &["calculation", "nstep", "prefix"]
    }

    fn get_field(&self, name: &str) -> Option<Value> {
        match name {
            "calculation" => Some(self.calculation.clone().into()),
            "nstep" => Some(self.nstep.into()),
            "prefix" => Some(self.prefix.clone().into()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> Result<()> {
        match name {
            "calculation" => assign(&mut self.calculation, name, "character", value),
            "nstep" => assign(&mut self.nstep, name, "integer", value),
            "prefix" => assign(&mut self.prefix, name, "character", value),
            _ => Err(NamelistError::AttributeNotFound(name.to_string())),
        }
    }

    fn remove_field(&mut self, name: &str) -> Result<()> {
        if name == "prefix" {
            return Err(NamelistError::FieldNotRemovable(name.to_string()));
        }
        self.set_field(name, Value::Absent)
    }

    fn clone_box(&self) -> Box<dyn ReservedFields> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn lowercase_calculation(_owner: &Namelist, flat: &mut FlatNamelist, _options: &TransformOptions) {
    if let Some(calculation) = flat.get_str("calculation").map(str::to_lowercase) {
        flat.insert("calculation", calculation);
    }
}

/// A `&control` namelist: declared fields plus one normalizing hook.
fn control() -> Namelist {
    Namelist::new()
        .with_fields(Control::default())
        .unwrap()
        .with_transform(Transform::new("lowercase_calculation", lowercase_calculation))
}

/// A derived flavour: the parent's hooks first, then its own.
fn relax_control() -> Namelist {
    control().with_transform(Transform::new("force_relax", |_, flat, options| {
        if options.get_bool("relax").unwrap_or(true) {
            flat.insert("calculation", "relax");
        }
    }))
}

fn init() {
    let _ = pretty_env_logger::try_init();
}

#[test]
fn test_reserved_fields_are_not_dynamic_entries() {
    init();
    let mut nml = control();
    nml.set_field("calculation", "SCF").unwrap();
    nml.set_field("tprnfor", true).unwrap();

    assert_eq!(nml.get("calculation"), None);
    assert_eq!(
        nml.reserved::<Control>().unwrap().calculation.as_deref(),
        Some("SCF")
    );
    assert_eq!(nml.get_field("calculation").unwrap(), Value::from("SCF"));
    assert_eq!(nml.get_field("nstep").unwrap(), Value::Absent);
    assert!(nml.contains("nstep"));
}

#[test]
fn test_len_and_names_skip_absent_reserved_fields() {
    init();
    let mut nml = control();
    assert_eq!(nml.len(), 0);
    assert!(nml.is_empty());

    nml.set_field("tprnfor", true).unwrap();
    nml.set_field("nstep", 20).unwrap();

    assert_eq!(nml.len(), 2);
    let names: Vec<_> = nml.names().collect();
    assert_eq!(names, vec!["tprnfor", "nstep"]);

    nml.set_field("nstep", Value::Absent).unwrap();
    assert_eq!(nml.names().collect::<Vec<_>>(), vec!["tprnfor"]);
}

#[test]
fn test_reserved_setter_rejects_wrong_type() {
    init();
    let mut nml = control();
    let err = nml.set_field("nstep", "many").unwrap_err();
    match err {
        NamelistError::InvalidFieldValue {
            field,
            expected,
            found,
        } => {
            assert_eq!(field, "nstep");
            assert_eq!(expected, "integer");
            assert_eq!(found, "character");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_reserved_removal() {
    init();
    let mut nml = control();
    nml.set_field("nstep", 5).unwrap();
    nml.set_field("prefix", "si").unwrap();

    assert_eq!(nml.remove_field("nstep").unwrap(), Value::Integer(5));
    assert_eq!(nml.get_field("nstep").unwrap(), Value::Absent);

    assert!(matches!(
        nml.remove_field("prefix"),
        Err(NamelistError::FieldNotRemovable(_))
    ));
    assert_eq!(nml.get_field("prefix").unwrap(), Value::from("si"));
}

#[test]
fn test_reserved_fields_written_after_dynamic_and_hooks_last() {
    init();
    let mut nml = control();
    nml.set_field("calculation", "SCF").unwrap();
    nml.set_field("tprnfor", true).unwrap();
    nml.set_field("nstep", 10).unwrap();

    let flat = nml.to_flat_namelist(&TransformOptions::new());
    let keys: Vec<_> = flat.keys().cloned().collect();
    assert_eq!(keys, vec!["tprnfor", "calculation", "nstep"]);
    assert_eq!(flat.get_str("calculation"), Some("scf"));
}

#[test]
fn test_derived_flavour_runs_parent_hooks_first() {
    init();
    let mut nml = relax_control();
    nml.set_field("calculation", "SCF").unwrap();

    let names: Vec<_> = nml.transforms().iter().map(Transform::name).collect();
    assert_eq!(names, vec!["lowercase_calculation", "force_relax"]);

    let flat = nml.to_flat_namelist(&TransformOptions::new());
    assert_eq!(flat.get_str("calculation"), Some("relax"));

    let flat = nml.to_flat_namelist(&TransformOptions::new().with("relax", false));
    assert_eq!(flat.get_str("calculation"), Some("scf"));
}

#[test]
fn test_installing_fields_moves_colliding_dynamic_entries() {
    init();
    let mut map = LinkedHashMap::new();
    map.insert("nstep".to_string(), Value::from(7));
    map.insert("title".to_string(), Value::from("si"));

    let mut nml = Namelist::from_map(map)
        .with_fields(Control::default())
        .unwrap();
    assert_eq!(nml.get("nstep"), None);
    assert_eq!(nml.get_field("nstep").unwrap(), Value::Integer(7));

    nml.set_field("nstep", 9).unwrap();
    assert_eq!(nml.len(), 2);
    assert_eq!(nml.names().collect::<Vec<_>>(), vec!["title", "nstep"]);
    assert_eq!(nml.get_field("nstep").unwrap(), Value::Integer(9));

    let flat = nml.to_flat_namelist(&TransformOptions::new());
    let keys: Vec<_> = flat.keys().cloned().collect();
    assert_eq!(keys, vec!["title", "nstep"]);
    assert_eq!(flat.get_i64("nstep"), Some(9));
}

#[test]
fn test_installing_fields_rejects_mistyped_dynamic_entry() {
    init();
    let mut map = LinkedHashMap::new();
    map.insert("nstep".to_string(), Value::from("many"));

    let err = Namelist::from_map(map)
        .with_fields(Control::default())
        .unwrap_err();
    assert!(matches!(
        err,
        NamelistError::InvalidFieldValue { ref field, .. } if field == "nstep"
    ));
}

#[test]
fn test_nested_reserved_namelist_writes_through_parent() {
    init();
    let mut group = control();
    group.set_field("calculation", "Relax").unwrap();
    group.set_field("nstep", 3).unwrap();

    let mut input = Namelist::new();
    input.set_field("control", group).unwrap();

    let text = input.to_string_with(&TransformOptions::new()).unwrap();
    assert_eq!(
        text,
        "&control\n    calculation = 'relax'\n    nstep = 3\n/\n"
    );
}

#[test]
fn test_equality_compares_reserved_values() {
    init();
    let mut a = control();
    let mut b = control();
    a.set_field("nstep", 1).unwrap();
    b.set_field("nstep", 1).unwrap();
    assert_eq!(a, b);

    b.set_field("nstep", 2).unwrap();
    assert_ne!(a, b);
    assert_ne!(a, Namelist::new());
}
