//! Entry points of a mapping call.

use crate::adapter::TypeAdapters;
use crate::info::TypeBindings;
use crate::naming::NamingPolicy;
use crate::node::{Navigator, Navigators, Node, extract_mime};
use crate::{DeserializeError, Response, Visitor};

// -----------------------------------------------------------------------------
// build

/// Maps a raw document onto `dest` using the global navigator registry.
///
/// The navigator is chosen by the MIME type of `content_type`, parameters
/// such as `charset` are ignored. `adapters` is only consulted if its
/// content type scope matches.
///
/// If `O` declares a payload member, the document fills that member with
/// all of its members; otherwise it fills `dest` itself with the members
/// carrying a directive.
///
/// # Examples
///
/// ```
/// use battery_map::adapter::TypeAdapters;
/// use battery_map::derive::Response;
/// use battery_map::naming::Identity;
/// use battery_map::{DeserializeError, build};
///
/// #[derive(Response, Default)]
/// struct Token {
///     #[response(required, name = "data.token")]
///     value: String,
///     #[response(name = "data.ttl")]
///     ttl: Option<u32>,
/// }
///
/// let mut token = Token::default();
/// build(
///     "application/json",
///     r#"{"data": {"token": "abc", "ttl": 60}}"#,
///     &mut token,
///     &Identity,
///     &TypeAdapters::new(),
/// )?;
/// assert_eq!(token.value, "abc");
/// assert_eq!(token.ttl, Some(60));
///
/// let err = build("text/html", "<p/>", &mut token, &Identity, &TypeAdapters::new());
/// assert!(matches!(err, Err(DeserializeError::UnsupportedContentType(m)) if m == "text/html"));
/// # Ok::<(), DeserializeError>(())
/// ```
pub fn build<O: Response>(
    content_type: &str,
    raw: &str,
    dest: &mut O,
    naming: &dyn NamingPolicy,
    adapters: &TypeAdapters,
) -> Result<(), DeserializeError> {
    let mime = extract_mime(content_type);
    // Release the registry lock before parsing.
    let navigator = Navigators::read_global().get(mime).cloned();
    match navigator {
        Some(navigator) => run(&*navigator, mime, raw, dest, naming, adapters),
        None => Err(DeserializeError::UnsupportedContentType(mime.to_owned())),
    }
}

// -----------------------------------------------------------------------------
// ObjectBuilder

/// Maps documents against an explicit navigator registry.
#[derive(Clone, Copy)]
pub struct ObjectBuilder<'a> {
    navigators: &'a Navigators,
}

impl<'a> ObjectBuilder<'a> {
    #[inline]
    pub fn new(navigators: &'a Navigators) -> Self {
        Self { navigators }
    }

    /// See [`build`].
    pub fn build<O: Response>(
        &self,
        content_type: &str,
        raw: &str,
        dest: &mut O,
        naming: &dyn NamingPolicy,
        adapters: &TypeAdapters,
    ) -> Result<(), DeserializeError> {
        let mime = extract_mime(content_type);
        match self.navigators.get(mime) {
            Some(navigator) => run(&**navigator, mime, raw, dest, naming, adapters),
            None => Err(DeserializeError::UnsupportedContentType(mime.to_owned())),
        }
    }
}

// -----------------------------------------------------------------------------
// Internal

fn run<O: Response>(
    navigator: &dyn Navigator,
    mime: &str,
    raw: &str,
    dest: &mut O,
    naming: &dyn NamingPolicy,
    adapters: &TypeAdapters,
) -> Result<(), DeserializeError> {
    #[cfg(all(debug_assertions, feature = "debug"))]
    {
        log::debug!("Mime: {mime}");
        log::debug!("Response: {raw}");
    }

    let root = navigator.parse(raw)?;
    let adapters = adapters.applies_to(mime).then_some(adapters);
    fill(&Visitor::new(naming, adapters), &*root, dest)
}

fn fill<O: Response>(
    visitor: &Visitor<'_>,
    root: &dyn Node,
    dest: &mut O,
) -> Result<(), DeserializeError> {
    match O::descriptor().payload() {
        Some((_member, fill_payload)) => {
            #[cfg(all(debug_assertions, feature = "debug"))]
            log::debug!("Payload: {}::{_member}", O::descriptor().type_path());

            fill_payload(dest, visitor, root)
        }
        None => visitor.visit_object(root, dest, &TypeBindings::root::<O>(), true),
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::VecDeque;
    use core::marker::PhantomData;
    use std::collections::HashMap;

    use serde_json::Value as Json;

    use crate::adapter::TypeAdapters;
    use crate::derive::{Response, ResponseEnum};
    use crate::info::Declared;
    use crate::naming::{CamelCase, FieldNameTranslator, Identity, SnakeCase};
    use crate::node::{Navigator, Navigators, Node};
    use crate::{DeserializeError, Enumeration, ObjectBuilder, ParseError, Response, build};

    const JSON: &str = "application/json";

    fn map<O: Response>(raw: &str, dest: &mut O) -> Result<(), DeserializeError> {
        build(JSON, raw, dest, &Identity, &TypeAdapters::new())
    }

    #[derive(Response, Default, Debug, PartialEq)]
    struct Deep {
        #[response(name = "a.b.c")]
        value: i32,
    }

    #[derive(Response, Default, Debug, Clone, PartialEq)]
    struct Foo {
        id: i32,
        name: String,
    }

    #[derive(Response, Default, Debug)]
    struct Envelope<T> {
        #[response]
        code: i32,
        #[response]
        data: T,
        #[response]
        items: Vec<T>,
    }

    #[test]
    fn dotted_name_walks_nested_objects() {
        let mut deep = Deep::default();
        map(r#"{"a": {"b": {"c": 42}}}"#, &mut deep).unwrap();
        assert_eq!(deep.value, 42);
    }

    #[test]
    fn literal_dotted_key_wins() {
        let mut deep = Deep::default();
        map(r#"{"a.b.c": 7, "a": {"b": {"c": 42}}}"#, &mut deep).unwrap();
        assert_eq!(deep.value, 7);
    }

    #[test]
    fn broken_path_keeps_value() {
        let mut deep = Deep { value: 5 };
        map(r#"{"a": null}"#, &mut deep).unwrap();
        assert_eq!(deep.value, 5);
        map(r#"{"a": {"b": 3}}"#, &mut deep).unwrap();
        assert_eq!(deep.value, 5);
    }

    #[derive(Response, Default)]
    struct Account {
        #[response]
        user_name: String,
        #[response]
        user_id: i64,
        #[response(name = "login")]
        login_name: Option<String>,
        note: String,
    }

    #[test]
    fn naming_policy_with_raw_name_fallback() {
        let naming = FieldNameTranslator::new(SnakeCase, CamelCase);
        let mut account = Account {
            login_name: Some("old".into()),
            ..Default::default()
        };

        build(
            JSON,
            r#"{"userName": "ann", "user_id": 3, "login_name": "x", "note": "n"}"#,
            &mut account,
            &naming,
            &TypeAdapters::new(),
        )
        .unwrap();

        assert_eq!(account.user_name, "ann");
        assert_eq!(account.user_id, 3);
        // Explicit names have no fallback, an absent `Option` becomes `None`.
        assert_eq!(account.login_name, None);
        // No directive, not read at the top level.
        assert_eq!(account.note, "");
    }

    #[test]
    fn generic_members_follow_bindings() {
        let raw = r#"{
            "code": 0,
            "data": {"id": 1, "name": "a"},
            "items": [{"id": 2, "name": "b"}, {"id": 3}]
        }"#;

        let mut envelope = Envelope::<Foo>::default();
        map(raw, &mut envelope).unwrap();

        assert_eq!(envelope.data, Foo { id: 1, name: "a".into() });
        assert_eq!(envelope.items.len(), 2);
        assert_eq!(envelope.items[0], Foo { id: 2, name: "b".into() });
        assert_eq!(envelope.items[1], Foo { id: 3, name: String::new() });

        let data = Envelope::<Foo>::descriptor().member("data").unwrap();
        assert_eq!(data.declared(), Declared::Param(0));
        let code = Envelope::<Foo>::descriptor().member("code").unwrap();
        assert_eq!(code.declared(), Declared::Concrete);

        let mut scalars = Envelope::<String>::default();
        map(r#"{"data": "x", "items": ["y", 1]}"#, &mut scalars).unwrap();
        assert_eq!(scalars.data, "x");
        assert_eq!(scalars.items, ["y", "1"]);
    }

    #[test]
    fn nested_object_requires_object_node() {
        let mut envelope = Envelope::<Foo>::default();
        let err = map(r#"{"data": 5}"#, &mut envelope).unwrap_err();
        let DeserializeError::Coercion(err) = err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(err.key(), "data");
        assert_eq!(err.expected(), "object");
    }

    #[derive(Response, Default)]
    struct Lists {
        #[response]
        maybe: Vec<Option<i32>>,
        #[response]
        strict: Vec<i32>,
    }

    #[test]
    fn null_array_elements() {
        let mut lists = Lists::default();
        map(r#"{"maybe": [1, null, 3]}"#, &mut lists).unwrap();
        assert_eq!(lists.maybe, [Some(1), None, Some(3)]);

        let err = map(r#"{"strict": [1, null]}"#, &mut lists).unwrap_err();
        let DeserializeError::Coercion(err) = err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(err.key(), "[1]");
        assert_eq!(err.value(), "null");
    }

    #[test]
    fn mapping_is_idempotent() {
        let raw = r#"{"code": 1, "data": {"id": 9, "name": "n"}, "items": []}"#;

        let mut first = Envelope::<Foo>::default();
        map(raw, &mut first).unwrap();
        let mut second = Envelope::<Foo>::default();
        map(raw, &mut second).unwrap();
        map(raw, &mut second).unwrap();

        assert_eq!(first.code, second.code);
        assert_eq!(first.data, second.data);
        assert_eq!(first.items, second.items);
    }

    #[derive(Response, Default)]
    struct Ticket {
        #[response(required)]
        id: i64,
        #[response]
        title: String,
    }

    #[test]
    fn missing_required_member() {
        let mut ticket = Ticket::default();
        let err = map(r#"{"title": "t"}"#, &mut ticket).unwrap_err();
        assert!(matches!(
            err,
            DeserializeError::MissingField { member: "id", ref key } if key == "id"
        ));

        // A null value is present, but cannot be stored in an `i64`.
        let err = map(r#"{"id": null, "title": "t"}"#, &mut ticket).unwrap_err();
        let DeserializeError::Coercion(err) = err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(err.key(), "id");
        assert_eq!(err.value(), "null");
        assert_eq!(err.expected(), "long");
    }

    #[test]
    fn null_scalar_members_fail() {
        let mut ticket = Ticket {
            id: 7,
            title: "stale".into(),
        };
        let err = map(r#"{"id": 8, "title": null}"#, &mut ticket).unwrap_err();
        assert_eq!(err.to_string(), "cannot convert `null` at `title` into string");
        assert_eq!(ticket.id, 8);
        assert_eq!(ticket.title, "stale");

        let mut account = Account::default();
        map(r#"{"user_name": "a", "login": null}"#, &mut account).unwrap();
        assert_eq!(account.login_name, None);
        assert!(map(r#"{"user_id": null}"#, &mut account).is_err());
    }

    #[derive(Response, Default)]
    struct Shapes {
        #[response]
        tags: HashMap<String, i32>,
        #[response]
        queue: VecDeque<i32>,
        #[response]
        grid: Vec<Vec<i32>>,
        #[response]
        list: Vec<i32>,
        #[response]
        count: i32,
    }

    #[test]
    fn unsupported_shapes_are_left_unchanged() {
        let mut shapes = Shapes {
            list: vec![9],
            ..Default::default()
        };
        map(
            r#"{"tags": {"a": 1}, "queue": [1], "grid": [[1]], "list": "x", "count": 2}"#,
            &mut shapes,
        )
        .unwrap();

        assert!(shapes.tags.is_empty());
        assert!(shapes.queue.is_empty());
        assert!(shapes.grid.is_empty());
        assert_eq!(shapes.list, [9]);
        assert_eq!(shapes.count, 2);
    }

    #[derive(Response, Default)]
    struct Reading {
        #[response]
        celsius: f64,
        #[response]
        label: String,
    }

    fn reading_adapters(adapters: &mut TypeAdapters) {
        adapters
            .register_fn::<f64, _>(|text| Ok(text.trim_end_matches('C').parse::<f64>()?))
            .register_fn::<String, _>(|text| Ok(text.to_uppercase()));
    }

    #[test]
    fn adapters_take_precedence() {
        let mut adapters = TypeAdapters::new();
        reading_adapters(&mut adapters);

        let mut reading = Reading::default();
        build(
            JSON,
            r#"{"celsius": "21.5C", "label": "out"}"#,
            &mut reading,
            &Identity,
            &adapters,
        )
        .unwrap();
        assert_eq!(reading.celsius, 21.5);
        assert_eq!(reading.label, "OUT");

        // Numbers reach the adapter as text too.
        build(JSON, r#"{"celsius": 10}"#, &mut reading, &Identity, &adapters).unwrap();
        assert_eq!(reading.celsius, 10.0);
        build(JSON, r#"{"label": 2.0}"#, &mut reading, &Identity, &adapters).unwrap();
        assert_eq!(reading.label, "2.0");

        let err = build(JSON, r#"{"celsius": "hot"}"#, &mut reading, &Identity, &adapters)
            .unwrap_err();
        assert!(matches!(err, DeserializeError::Adapter { ref value, .. } if value == "hot"));
        assert!(err.adapter_source().is_some());
    }

    #[test]
    fn adapters_are_scoped_by_content_type() {
        let mut adapters = TypeAdapters::for_content_type("application/xml");
        reading_adapters(&mut adapters);

        let mut reading = Reading::default();
        build(JSON, r#"{"label": "out"}"#, &mut reading, &Identity, &adapters).unwrap();
        assert_eq!(reading.label, "out");

        let err =
            build(JSON, r#"{"celsius": "21.5C"}"#, &mut reading, &Identity, &adapters).unwrap_err();
        assert!(matches!(err, DeserializeError::Coercion(_)));
    }

    #[derive(Debug, Default, PartialEq)]
    struct Money(u64);

    crate::impl_adapted_value!(Money);

    #[derive(Response, Default)]
    struct Price {
        #[response]
        amount: Money,
    }

    #[test]
    fn adapted_type_requires_adapter() {
        let mut price = Price::default();
        let err = map(r#"{"amount": "1.05"}"#, &mut price).unwrap_err();
        assert!(matches!(err, DeserializeError::Instantiation { ref key, .. } if key == "amount"));

        let mut adapters = TypeAdapters::new();
        adapters.register_fn(|text: &str| {
            let (whole, cents) = text.split_once('.').ok_or("missing cents")?;
            Ok(Money(whole.parse::<u64>()? * 100 + cents.parse::<u64>()?))
        });
        build(JSON, r#"{"amount": "1.05"}"#, &mut price, &Identity, &adapters).unwrap();
        assert_eq!(price.amount, Money(105));

        // Absent values leave adapted members alone.
        map("{}", &mut price).unwrap();
        assert_eq!(price.amount, Money(105));
    }

    #[derive(Response, Default)]
    struct GetFoo {
        #[response]
        ignored: i32,
        #[response(payload)]
        foo: Foo,
    }

    #[test]
    fn payload_member_receives_document() {
        let mut response = GetFoo::default();
        map(r#"{"id": 4, "name": "z", "ignored": 1}"#, &mut response).unwrap();

        assert_eq!(response.foo, Foo { id: 4, name: "z".into() });
        assert_eq!(response.ignored, 0);
        assert_eq!(GetFoo::descriptor().payload().map(|(name, _)| name), Some("foo"));
    }

    #[derive(Response, Default)]
    struct Contact {
        #[response(set = Self::set_email)]
        email: String,
        calls: u32,
    }

    impl Contact {
        fn set_email(&mut self, email: String) {
            self.email = email.to_lowercase();
            self.calls += 1;
        }
    }

    #[test]
    fn setter_members() {
        let mut contact = Contact::default();
        map(r#"{"email": "A@B.C"}"#, &mut contact).unwrap();
        assert_eq!(contact.email, "a@b.c");
        assert_eq!(contact.calls, 1);

        map(r#"{"email": null}"#, &mut contact).unwrap();
        map("{}", &mut contact).unwrap();
        assert_eq!(contact.email, "a@b.c");
        assert_eq!(contact.calls, 1);
    }

    #[derive(Response, Default)]
    struct Marked {
        #[response]
        marker: PhantomData<i32>,
        #[response]
        unit: (),
        #[response(skip)]
        cache: Vec<u8>,
        #[response]
        id: u8,
    }

    #[test]
    fn excluded_and_skipped_members() {
        let mut marked = Marked {
            cache: vec![1],
            ..Default::default()
        };
        map(r#"{"marker": 5, "unit": "x", "cache": [], "id": 3}"#, &mut marked).unwrap();
        assert_eq!(marked.cache, [1]);
        assert_eq!(marked.id, 3);
        assert!(Marked::descriptor().member("cache").is_none());
    }

    #[derive(ResponseEnum, Default, Debug, PartialEq)]
    enum State {
        #[default]
        Open,
        #[response(name = "closed")]
        Closed,
    }

    #[derive(Response, Default)]
    struct Issue {
        #[response]
        state: State,
        #[response]
        history: Vec<State>,
    }

    #[test]
    fn enum_members_match_exact_names() {
        assert_eq!(State::VARIANTS, ["Open", "closed"]);
        assert_eq!(State::Closed.variant_name(), "closed");

        let mut issue = Issue::default();
        map(r#"{"state": "closed", "history": ["Open", "closed"]}"#, &mut issue).unwrap();
        assert_eq!(issue.state, State::Closed);
        assert_eq!(issue.history, [State::Open, State::Closed]);

        let err = map(r#"{"state": "CLOSED"}"#, &mut issue).unwrap_err();
        assert!(matches!(err, DeserializeError::Coercion(_)));
    }

    #[test]
    fn content_type_selection() {
        let mut deep = Deep::default();
        build(
            "Application/JSON; charset=utf-8",
            r#"{"a.b.c": 1}"#,
            &mut deep,
            &Identity,
            &TypeAdapters::new(),
        )
        .unwrap();
        assert_eq!(deep.value, 1);

        let err = build("text/plain", "1", &mut deep, &Identity, &TypeAdapters::new());
        assert!(
            matches!(err, Err(DeserializeError::UnsupportedContentType(ref m)) if m == "text/plain")
        );
    }

    #[test]
    fn malformed_document() {
        let mut deep = Deep { value: 5 };
        let err = map(r#"{"a":"#, &mut deep).unwrap_err();
        assert!(matches!(err, DeserializeError::Parse(_)));
        assert_eq!(deep.value, 5);
    }

    struct VendorJson;

    impl Navigator for VendorJson {
        fn content_type(&self) -> &str {
            "application/vnd.test+json"
        }

        fn parse(&self, raw: &str) -> Result<Box<dyn Node>, ParseError> {
            serde_json::from_str::<Json>(raw)
                .map(|value| Box::new(value) as Box<dyn Node>)
                .map_err(|e| ParseError::new(self.content_type(), e))
        }
    }

    #[test]
    fn explicit_navigator_registry() {
        let mut navigators = Navigators::empty();
        assert!(navigators.register(VendorJson).is_none());
        let builder = ObjectBuilder::new(&navigators);

        let mut deep = Deep::default();
        builder
            .build(
                "application/vnd.test+json",
                r#"{"a": {"b": {"c": 8}}}"#,
                &mut deep,
                &Identity,
                &TypeAdapters::new(),
            )
            .unwrap();
        assert_eq!(deep.value, 8);

        let err = builder.build(JSON, "{}", &mut deep, &Identity, &TypeAdapters::new());
        assert!(matches!(err, Err(DeserializeError::UnsupportedContentType(_))));
    }
}
