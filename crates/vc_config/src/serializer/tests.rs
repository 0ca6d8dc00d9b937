use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use alloc::{format, vec};
use core::any::Any;
use core::cell::Cell;

use vc_node::{ConfigNode, ConfigValue};

use crate::derive::ConfigObject;
use crate::info::{TypeInfo, Typed};
use crate::parser::{
    ConfigNodeParser, NodeObjectParser, ParserDatabase, ParserRegistration, TypedValueParser,
};
use crate::{
    ArrayHandling, ConfigCallbacks, ConfigError, ConfigObject, ConfigSerializer, MemberError,
    ParseError, ParserInitError, SerializeContext, SerializerSettings,
};

// -----------------------------------------------------------------------------
// Fixtures

#[derive(ConfigObject, Default, Debug, PartialEq)]
struct Resource {
    #[config(required)]
    name: String,
    #[config]
    amount: f64,
}

impl Resource {
    fn new(name: &str, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

#[derive(ConfigObject, Default, Debug, PartialEq)]
struct Engine {
    #[config(required)]
    name: String,
    #[config(name = "maxThrust")]
    max_thrust: f32,
    #[config]
    enabled: bool,
    #[config]
    tags: Vec<String>,
    #[config]
    gimbal: Option<u8>,
    #[config(name = "RESOURCE")]
    resources: Vec<Resource>,
    #[config(name = "COOLER")]
    cooler: Option<Resource>,
    cache: u32,
}

fn engine() -> Engine {
    Engine {
        name: "LV-T30".into(),
        max_thrust: 215.0,
        enabled: true,
        tags: vec!["liquid".into(), "booster".into()],
        gimbal: Some(3),
        resources: vec![
            Resource::new("LiquidFuel", 90.0),
            Resource::new("Oxidizer", 110.0),
        ],
        cooler: None,
        cache: 0,
    }
}

fn value_names(node: &ConfigNode) -> Vec<&str> {
    node.values().iter().map(ConfigValue::name).collect()
}

// -----------------------------------------------------------------------------
// Round trips

#[test]
fn round_trip_single_value() {
    let source = engine();
    let node = ConfigSerializer::new().serialize(&source, "ENGINE").unwrap();

    assert_eq!(node.name(), "ENGINE");
    assert_eq!(
        value_names(&node),
        ["name", "maxThrust", "enabled", "tags", "gimbal"]
    );
    assert_eq!(node.get_value("maxThrust"), Some("215"));
    assert_eq!(node.get_value("enabled"), Some("true"));
    assert_eq!(node.get_value("tags"), Some("liquid,booster"));
    assert_eq!(node.get_nodes("RESOURCE").count(), 2);
    assert!(!node.has_node("COOLER"));

    let loaded: Engine = ConfigSerializer::new().deserialize(&node).unwrap();
    assert_eq!(loaded, source);
}

#[test]
fn round_trip_separate_values() {
    let settings = SerializerSettings::DEFAULT.with_array_handling(ArrayHandling::SeparateValues);
    let serializer = ConfigSerializer::new().with_settings(settings);

    let source = engine();
    let node = serializer.serialize(&source, "ENGINE").unwrap();
    assert_eq!(
        node.get_values("tags").collect::<Vec<_>>(),
        ["liquid", "booster"]
    );

    let loaded: Engine = serializer.deserialize(&node).unwrap();
    assert_eq!(loaded, source);
}

#[test]
fn empty_sequences_and_none_emit_nothing() {
    let source = Engine {
        name: "Ant".into(),
        ..Engine::default()
    };
    let node = ConfigSerializer::new().serialize(&source, "ENGINE").unwrap();

    assert!(!node.has_value("tags"));
    assert!(!node.has_value("gimbal"));
    assert_eq!(node.node_count(), 0);
}

#[test]
fn split_trims_and_drops_empty_pieces() {
    let mut node = ConfigNode::new("ENGINE");
    node.add_value("name", "Ant");
    node.add_value("tags", " a, b,,c ");

    let loaded: Engine = ConfigSerializer::new().deserialize(&node).unwrap();
    assert_eq!(loaded.tags, ["a", "b", "c"]);
}

#[test]
fn missing_members_keep_defaults() {
    let mut node = ConfigNode::new("ENGINE");
    node.add_value("name", "Ant");

    let defaults = Engine {
        max_thrust: 2.0,
        gimbal: Some(1),
        ..Engine::default()
    };
    let loaded = ConfigSerializer::new()
        .deserialize_with_defaults(&node, defaults)
        .unwrap();

    assert_eq!(loaded.name, "Ant");
    assert_eq!(loaded.max_thrust, 2.0);
    assert_eq!(loaded.gimbal, Some(1));
}

// -----------------------------------------------------------------------------
// Hard failures

#[test]
fn required_field_is_enforced() {
    let node = ConfigNode::new("ENGINE");
    let err = ConfigSerializer::new().deserialize::<Engine>(&node).unwrap_err();

    assert!(matches!(err, ConfigError::MissingField { cause: None, .. }));
    assert_eq!(err.field(), Some("name"));
}

#[test]
fn required_nested_field_fails_its_member_only() {
    let mut node = ConfigNode::new("ENGINE");
    node.add_value("name", "Ant");
    let mut resource = ConfigNode::new("RESOURCE");
    resource.add_value("amount", "5");
    node.add_node(resource);

    let report = ConfigSerializer::new()
        .deserialize_report::<Engine>(&node)
        .unwrap();

    assert_eq!(report.value.name, "Ant");
    assert!(report.value.resources.is_empty());
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].field, "RESOURCE");
}

#[test]
fn required_value_is_enforced() {
    #[derive(ConfigObject, Default)]
    struct Tank {
        #[config(required)]
        capacity: Option<f64>,
    }

    let err = ConfigSerializer::new()
        .serialize(&Tank::default(), "TANK")
        .unwrap_err();
    assert!(matches!(err, ConfigError::MissingValue { cause: None, .. }));
    assert_eq!(err.field(), Some("capacity"));
}

#[test]
fn empty_node_name_is_rejected() {
    let err = ConfigSerializer::new().serialize(&engine(), "").unwrap_err();
    assert!(matches!(err, ConfigError::EmptyNodeName));
}

// -----------------------------------------------------------------------------
// Soft failures

#[test]
fn invalid_value_is_isolated() {
    let mut node = ConfigNode::new("ENGINE");
    node.add_value("name", "Ant");
    node.add_value("maxThrust", "fast");
    node.add_value("enabled", "true");

    let report = ConfigSerializer::new()
        .deserialize_report::<Engine>(&node)
        .unwrap();

    assert!(!report.is_clean());
    assert_eq!(report.diagnostics.len(), 1);
    let diagnostic = &report.diagnostics[0];
    assert_eq!(diagnostic.member, "max_thrust");
    assert_eq!(diagnostic.field, "maxThrust");
    assert!(matches!(
        diagnostic.error,
        MemberError::Parse(ParseError::InvalidValue { .. })
    ));

    assert_eq!(report.value.max_thrust, 0.0);
    assert!(report.value.enabled);
}

#[test]
fn invalid_required_value_carries_its_cause() {
    let mut node = ConfigNode::new("RESOURCE");
    node.add_value("name", "Ore");
    node.add_value("amount", "lots");

    #[derive(ConfigObject, Default, Debug)]
    struct Strict {
        #[config(required)]
        amount: f64,
    }

    let err = ConfigSerializer::new().deserialize::<Strict>(&node).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::MissingField {
            cause: Some(MemberError::Parse(_)),
            ..
        }
    ));
}

#[test]
fn nested_sequences_are_unsupported() {
    #[derive(ConfigObject, Default)]
    struct Grid {
        #[config]
        cells: Vec<Vec<u8>>,
        #[config]
        size: u8,
    }

    let mut node = ConfigNode::new("GRID");
    node.add_value("cells", "1,2");
    node.add_value("size", "2");

    let report = ConfigSerializer::new()
        .deserialize_report::<Grid>(&node)
        .unwrap();
    assert_eq!(report.value.size, 2);
    assert_eq!(report.diagnostics.len(), 1);
    assert!(matches!(
        report.diagnostics[0].error,
        MemberError::UnsupportedType(_)
    ));

    let grid = Grid {
        cells: vec![vec![1]],
        size: 1,
    };
    let mut saved = ConfigNode::new("GRID");
    let diagnostics = ConfigSerializer::new()
        .serialize_into(&grid, &mut saved)
        .unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(value_names(&saved), ["size"]);
}

#[test]
fn missing_parser_is_reported() {
    #[derive(Default)]
    struct Meters(f64);
    crate::impl_config_scalar!(Meters);

    #[derive(ConfigObject, Default)]
    struct Ladder {
        #[config]
        height: Meters,
        #[config]
        rungs: u8,
    }

    let ladder = Ladder {
        height: Meters(3.0),
        rungs: 9,
    };
    let mut node = ConfigNode::new("LADDER");
    let diagnostics = ConfigSerializer::new()
        .serialize_into(&ladder, &mut node)
        .unwrap();

    assert_eq!(value_names(&node), ["rungs"]);
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(
        diagnostics[0].error,
        MemberError::NoParser { .. }
    ));
    assert_eq!(ladder.height.0, 3.0);
}

#[test]
fn fixed_array_length_mismatch() {
    #[derive(ConfigObject, Default)]
    struct Axis {
        #[config]
        vector: [f32; 3],
    }

    let mut node = ConfigNode::new("AXIS");
    node.add_value("vector", "1,2");
    let report = ConfigSerializer::new()
        .deserialize_report::<Axis>(&node)
        .unwrap();
    assert!(matches!(
        report.diagnostics[0].error,
        MemberError::Collect {
            expected: 3,
            found: 2,
            ..
        }
    ));

    node = ConfigNode::new("AXIS");
    node.add_value("vector", "0, 0, 1");
    let axis: Axis = ConfigSerializer::new().deserialize(&node).unwrap();
    assert_eq!(axis.vector, [0.0, 0.0, 1.0]);
}

// -----------------------------------------------------------------------------
// Settings

#[test]
fn member_overrides_apply() {
    #[derive(ConfigObject, Default, Debug, PartialEq)]
    struct Part {
        #[config(array_handling = SeparateValues)]
        module: Vec<String>,
        #[config(separator = ';')]
        modes: Vec<String>,
        #[config]
        tags: Vec<String>,
    }

    let part = Part {
        module: vec!["A".into(), "B".into()],
        modes: vec!["x".into(), "y".into()],
        tags: vec!["t".into(), "u".into()],
    };
    let node = ConfigSerializer::new().serialize(&part, "PART").unwrap();

    assert_eq!(node.get_values("module").collect::<Vec<_>>(), ["A", "B"]);
    assert_eq!(node.get_value("modes"), Some("x;y"));
    assert_eq!(node.get_value("tags"), Some("t,u"));

    let loaded: Part = ConfigSerializer::new().deserialize(&node).unwrap();
    assert_eq!(loaded, part);
}

#[test]
fn nested_objects_inherit_member_settings() {
    #[derive(ConfigObject, Default, Debug, PartialEq)]
    struct Inner {
        #[config]
        tags: Vec<String>,
    }

    #[derive(ConfigObject, Default, Debug, PartialEq)]
    struct Outer {
        #[config(name = "INNER", separator = '|')]
        inner: Inner,
    }

    let outer = Outer {
        inner: Inner {
            tags: vec!["a".into(), "b".into()],
        },
    };
    let node = ConfigSerializer::new().serialize(&outer, "OUTER").unwrap();
    let inner = node.get_node("INNER").unwrap();
    assert_eq!(inner.get_value("tags"), Some("a|b"));

    let loaded: Outer = ConfigSerializer::new().deserialize(&node).unwrap();
    assert_eq!(loaded, outer);
}

// -----------------------------------------------------------------------------
// Raw nodes and optional layers

#[test]
fn raw_node_members_round_trip() {
    #[derive(ConfigObject, Default, Debug, PartialEq)]
    struct Module {
        #[config(name = "DATA")]
        data: ConfigNode,
        #[config(name = "EXTRA")]
        extra: Option<ConfigNode>,
    }

    let mut data = ConfigNode::new("ignored");
    data.add_value("key", "value");
    data.add_node(ConfigNode::new("CHILD"));

    let module = Module { data, extra: None };
    let node = ConfigSerializer::new().serialize(&module, "MODULE").unwrap();
    let saved = node.get_node("DATA").unwrap();
    assert_eq!(saved.get_value("key"), Some("value"));
    assert!(saved.has_node("CHILD"));

    let loaded: Module = ConfigSerializer::new().deserialize(&node).unwrap();
    assert_eq!(loaded.data.get_value("key"), Some("value"));
    assert_eq!(loaded.data.name(), "DATA");
    assert!(loaded.extra.is_none());
}

#[test]
fn optional_elements_are_skipped() {
    #[derive(ConfigObject, Default)]
    struct Slots {
        #[config]
        slots: Vec<Option<u8>>,
    }

    let slots = Slots {
        slots: vec![Some(1), None, Some(3)],
    };
    let node = ConfigSerializer::new().serialize(&slots, "SLOTS").unwrap();
    assert_eq!(node.get_value("slots"), Some("1,3"));

    let loaded: Slots = ConfigSerializer::new().deserialize(&node).unwrap();
    assert_eq!(loaded.slots, [Some(1), Some(3)]);
}

// -----------------------------------------------------------------------------
// Hooks

#[derive(ConfigObject, Default)]
#[config(callbacks)]
struct Sensor {
    #[config]
    range: u32,
    loaded: u32,
    saved: Cell<u32>,
}

impl ConfigCallbacks for Sensor {
    fn on_post_deserialize(&mut self) {
        self.loaded += 1;
    }

    fn on_pre_serialize(&self) {
        self.saved.set(self.saved.get() + 1);
    }
}

#[derive(ConfigObject, Default)]
#[config(callbacks)]
struct Station {
    #[config(name = "SENSOR")]
    sensors: Vec<Sensor>,
    #[config(name = "MAIN")]
    main: Sensor,
    loaded: u32,
    saved: Cell<u32>,
}

impl ConfigCallbacks for Station {
    fn on_post_deserialize(&mut self) {
        self.loaded += 1;
    }

    fn on_pre_serialize(&self) {
        self.saved.set(self.saved.get() + 1);
    }
}

#[test]
fn hooks_run_once_per_object() {
    let station = Station {
        sensors: vec![Sensor::default(), Sensor::default()],
        ..Station::default()
    };

    let node = ConfigSerializer::new().serialize(&station, "STATION").unwrap();
    assert_eq!(station.saved.get(), 1);
    assert_eq!(station.main.saved.get(), 1);
    assert!(station.sensors.iter().all(|s| s.saved.get() == 1));

    let loaded: Station = ConfigSerializer::new().deserialize(&node).unwrap();
    assert_eq!(loaded.loaded, 1);
    assert_eq!(loaded.main.loaded, 1);
    assert_eq!(loaded.sensors.len(), 2);
    assert!(loaded.sensors.iter().all(|s| s.loaded == 1));
}

#[test]
fn hooks_skip_failed_calls() {
    #[derive(ConfigObject, Default)]
    #[config(callbacks)]
    struct Strict {
        #[config(required)]
        id: u32,
        loaded: u32,
    }

    impl ConfigCallbacks for Strict {
        fn on_post_deserialize(&mut self) {
            self.loaded += 1;
        }
    }

    let mut strict = Strict::default();
    let result = ConfigSerializer::new().deserialize_into(&ConfigNode::new("S"), &mut strict);
    assert!(result.is_err());
    assert_eq!(strict.loaded, 0);
}

#[test]
fn pre_serialize_runs_before_a_failing_save() {
    #[derive(ConfigObject, Default)]
    #[config(callbacks)]
    struct Relay {
        #[config(required)]
        code: Option<u32>,
        saved: Cell<u32>,
    }

    impl ConfigCallbacks for Relay {
        fn on_pre_serialize(&self) {
            self.saved.set(self.saved.get() + 1);
        }
    }

    #[derive(ConfigObject, Default)]
    struct Mast {
        #[config(name = "RELAY")]
        relay: Relay,
        #[config]
        height: u32,
    }

    let mast = Mast {
        height: 12,
        ..Mast::default()
    };
    let mut node = ConfigNode::new("MAST");
    let diagnostics = ConfigSerializer::new()
        .serialize_into(&mast, &mut node)
        .unwrap();

    assert_eq!(mast.relay.saved.get(), 1);
    assert_eq!(diagnostics.len(), 1);
    assert!(!node.has_node("RELAY"));
    assert_eq!(node.get_value("height"), Some("12"));
}

// -----------------------------------------------------------------------------
// Member tables

#[test]
fn member_tables_are_cached() {
    assert!(core::ptr::eq(Engine::members(), Engine::members()));
    assert!(core::ptr::eq(Engine::type_info(), Engine::type_info()));

    let names: Vec<_> = Engine::members()
        .iter()
        .map(|member| member.effective_name())
        .collect();
    assert_eq!(
        names,
        ["name", "maxThrust", "enabled", "tags", "gimbal", "RESOURCE", "COOLER"]
    );
}

#[test]
fn generic_objects() {
    #[derive(ConfigObject, Default, Debug, PartialEq)]
    struct Pair<T: Default> {
        #[config]
        first: T,
        #[config]
        second: T,
    }

    let pair = Pair {
        first: 1_u16,
        second: 2,
    };
    let node = ConfigSerializer::new().serialize(&pair, "PAIR").unwrap();
    let loaded: Pair<u16> = ConfigSerializer::new().deserialize(&node).unwrap();
    assert_eq!(loaded, pair);

    assert!(!core::ptr::eq(
        <Pair<u16>>::type_info(),
        <Pair<u32>>::type_info()
    ));
}

// -----------------------------------------------------------------------------
// Parser resolution

trait Part {}

#[derive(ConfigObject, Default)]
#[config(extends(dyn Part))]
struct Wing {
    #[config]
    span: f32,
}

impl Part for Wing {}

/// Loads like the fallback parser, and tags the node when saving.
struct TaggingParser<const TAG: u8>;

impl<const TAG: u8> Default for TaggingParser<TAG> {
    fn default() -> Self {
        Self
    }
}

impl<const TAG: u8> ConfigNodeParser for TaggingParser<TAG> {
    fn parse(
        &self,
        node: &ConfigNode,
        target: &'static TypeInfo,
        cx: &mut SerializeContext<'_>,
    ) -> Result<Box<dyn Any>, ParseError> {
        NodeObjectParser.parse(node, target, cx)
    }

    fn save(
        &self,
        node: &mut ConfigNode,
        value: &dyn Any,
        target: &'static TypeInfo,
        cx: &mut SerializeContext<'_>,
    ) -> Result<(), ParseError> {
        NodeObjectParser.save(node, value, target, cx)?;
        node.add_value("parser", TAG.to_string());
        Ok(())
    }
}

#[derive(ConfigObject, Default)]
struct Craft {
    #[config(name = "WING")]
    wing: Wing,
}

fn saved_tag(database: &ParserDatabase) -> Option<String> {
    let node = ConfigSerializer::with_database(database)
        .serialize(&Craft::default(), "CRAFT")
        .unwrap();
    node.get_node("WING")?.get_value("parser").map(String::from)
}

fn database(extra: impl IntoIterator<Item = ParserRegistration>) -> ParserDatabase {
    ParserDatabase::from_registrations(ParserRegistration::builtins().iter().copied().chain(extra))
}

#[test]
fn fallback_parser_handles_derived_objects() {
    let database = database([]);
    assert_eq!(saved_tag(&database), None);

    let entry = database.nodes().resolve_entry(Wing::type_info()).unwrap();
    assert!(entry.parser_type().is::<NodeObjectParser>());
}

#[test]
fn assignable_parser_beats_fallback() {
    let database = database([ParserRegistration::node::<TaggingParser<1>, dyn Part>()]);
    assert_eq!(saved_tag(&database).as_deref(), Some("1"));
}

#[test]
fn highest_priority_wins_among_assignable() {
    let database = database([
        ParserRegistration::node::<TaggingParser<1>, dyn Part>().with_priority(5),
        ParserRegistration::node::<TaggingParser<2>, dyn Part>().with_priority(7),
    ]);
    assert_eq!(saved_tag(&database).as_deref(), Some("2"));
}

#[test]
fn exact_match_beats_priority() {
    #[derive(ConfigObject, Default)]
    #[config(extends(dyn Part))]
    struct Fin {
        #[config]
        area: f32,
    }

    impl Part for Fin {}

    let database = database([
        ParserRegistration::node::<TaggingParser<1>, dyn Part>().with_priority(5),
        ParserRegistration::node::<TaggingParser<2>, Wing>().with_priority(1),
    ]);
    assert_eq!(saved_tag(&database).as_deref(), Some("2"));

    let entry = database.nodes().resolve_entry(Fin::type_info()).unwrap();
    assert!(entry.parser_type().is::<TaggingParser<1>>());
}

#[test]
fn priority_ties_resolve_in_parser_path_order() {
    let registrations = [
        ParserRegistration::node::<TaggingParser<9>, dyn Part>(),
        ParserRegistration::node::<TaggingParser<3>, dyn Part>(),
    ];
    let forward = database(registrations);
    let backward = database(registrations.into_iter().rev());

    let expected = forward
        .nodes()
        .iter()
        .find(|entry| entry.target().is::<dyn Part>())
        .map(|entry| entry.parser_type())
        .unwrap();

    for database in [&forward, &backward] {
        let entry = database.nodes().resolve_entry(Wing::type_info()).unwrap();
        assert_eq!(entry.parser_type(), expected);
    }
    assert_eq!(saved_tag(&forward), saved_tag(&backward));
}

#[test]
fn higher_priority_takes_exact_slot() {
    #[derive(Default)]
    struct YesNo;

    impl TypedValueParser for YesNo {
        type Target = bool;

        fn parse_value(&self, value: &str, _: &SerializerSettings) -> Result<bool, ParseError> {
            match value {
                "yes" => Ok(true),
                "no" => Ok(false),
                _ => Err(ParseError::invalid_value(value, "bool")),
            }
        }

        fn save_value(&self, value: &bool, _: &SerializerSettings) -> Result<String, ParseError> {
            Ok(String::from(if *value { "yes" } else { "no" }))
        }
    }

    let database = database([ParserRegistration::value::<YesNo, bool>().with_priority(1)]);
    let serializer = ConfigSerializer::with_database(&database);

    let mut node = ConfigNode::new("ENGINE");
    node.add_value("name", "Ant");
    node.add_value("enabled", "yes");
    let engine: Engine = serializer.deserialize(&node).unwrap();
    assert!(engine.enabled);

    let saved = serializer.serialize(&engine, "ENGINE").unwrap();
    assert_eq!(saved.get_value("enabled"), Some("yes"));
}

#[test]
fn failing_factory_is_excluded() {
    let broken = ParserRegistration::node::<TaggingParser<1>, dyn Part>()
        .with_factory(|| Err(ParserInitError::new("unavailable")));
    let database = database([broken]);

    assert_eq!(database.nodes().len(), 2);
    assert_eq!(saved_tag(&database), None);
}

#[test]
fn empty_database_reports_every_member() {
    let database = ParserDatabase::from_registrations([]);
    let mut node = ConfigNode::new("CRAFT");
    let diagnostics = ConfigSerializer::with_database(&database)
        .serialize_into(&Craft::default(), &mut node)
        .unwrap();

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(node.node_count(), 0);
    assert!(format!("{}", diagnostics[0]).contains("WING"));
}
