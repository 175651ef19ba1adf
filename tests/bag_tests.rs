use parampack::{
    pack_element, register_param_set, unpack_element, unpack_element_in_context, FieldDef,
    ParamDef, ParamElement, ParamId, ParamSetDef, PackOptions, Value, ValueKind,
};

// Set 20, "cfg":
//   0 profile   Bag   fields: timeout(1) retries(2) inner(3)
//   1 fine      U16   (declared child of timeout)
//   2 timeout   U32
//   3 retries   U8
//   4 inner     Bag   fields: deep(7)
//   5 deep      Str
//   6 narrow    Bag   one field, member count capped at 1
fn setup() -> std::sync::Arc<parampack::ParamSet> {
    let profile = ParamId::new(20, 0);
    let fine = ParamId::new(20, 1);
    let timeout = ParamId::new(20, 2);
    let retries = ParamId::new(20, 3);
    let inner = ParamId::new(20, 4);
    let deep = ParamId::new(20, 5);
    let narrow = ParamId::new(20, 6);

    let def = ParamSetDef::new(20, "cfg")
        .param(ParamDef::new("profile", ValueKind::Bag).fields(vec![
            FieldDef::new(1, "timeout", timeout, profile),
            FieldDef::new(2, "retries", retries, profile),
            FieldDef::new(3, "inner", inner, profile),
        ]))
        .param(ParamDef::new("fine", ValueKind::U16))
        .param(ParamDef::new("timeout", ValueKind::U32).children(vec![fine]))
        .param(ParamDef::new("retries", ValueKind::U8))
        .param(
            ParamDef::new("inner", ValueKind::Bag)
                .fields(vec![FieldDef::new(7, "deep", deep, inner)]),
        )
        .param(ParamDef::new("deep", ValueKind::Str))
        .param(
            ParamDef::new("narrow", ValueKind::Bag)
                .bounds(0, 1)
                .fields(vec![FieldDef::new(1, "r", retries, narrow)]),
        );
    register_param_set(&def).unwrap()
}

fn member(id: ParamId, context: ParamId, field_id: u32, tag: u8, value: Value) -> ParamElement {
    let mut elem = ParamElement::new(id, tag).in_context(context, field_id);
    elem.value = Some(value);
    elem
}

#[test]
fn test_bag_roundtrip() {
    let set = setup();
    let options = PackOptions::default();
    let profile = set.param_id(0);

    let members: parampack::ParamList = [
        member(set.param_id(2), profile, 1, 0, Value::U32(5)),
        member(set.param_id(3), profile, 2, 0, Value::U8(3)),
    ]
    .into_iter()
    .collect();

    let elem = ParamElement::with_value(profile, 0, Value::Bag(members)).unwrap();
    let wire = pack_element(&elem, &options).unwrap();
    assert_eq!(wire, "cfg.profile={timeout=0x5,retries=0x3}");

    let back = unpack_element(&wire, &options).unwrap().element;
    assert_eq!(back, elem);

    let bag = back.value().unwrap().as_bag().unwrap();
    assert_eq!(bag.len(), 2);
    for m in bag.iter() {
        let f = m.context.unwrap();
        assert_eq!(f.context, profile);
    }
}

#[test]
fn test_empty_bag() {
    let set = setup();
    let options = PackOptions::default();
    let profile = set.param_id(0);

    let elem =
        ParamElement::with_value(profile, 0, Value::Bag(parampack::ParamList::new())).unwrap();
    let wire = pack_element(&elem, &options).unwrap();
    assert_eq!(wire, "cfg.profile={}");

    let back = unpack_element(&wire, &options).unwrap().element;
    assert_eq!(back.value().unwrap().as_bag().unwrap().len(), 0);
}

#[test]
fn test_nested_bags() {
    let set = setup();
    let options = PackOptions::default();
    let profile = set.param_id(0);
    let inner = set.param_id(4);

    let deep_members: parampack::ParamList =
        [member(set.param_id(5), inner, 7, 0, Value::Str("low,level".into()))]
            .into_iter()
            .collect();
    let members: parampack::ParamList = [
        member(set.param_id(2), profile, 1, 0, Value::U32(9)),
        member(inner, profile, 3, 0, Value::Bag(deep_members)),
    ]
    .into_iter()
    .collect();

    let elem = ParamElement::with_value(profile, 0, Value::Bag(members)).unwrap();
    let wire = pack_element(&elem, &options).unwrap();
    assert_eq!(wire, "cfg.profile={timeout=0x9,inner={deep=low\\,level}}");

    let back = unpack_element(&wire, &options).unwrap().element;
    assert_eq!(back, elem);
}

#[test]
fn test_tagged_bag_members() {
    let set = setup();
    let options = PackOptions::default();
    let profile = set.param_id(0);

    let members: parampack::ParamList = [
        member(set.param_id(3), profile, 2, 1, Value::U8(1)),
        member(set.param_id(3), profile, 2, 2, Value::U8(2)),
    ]
    .into_iter()
    .collect();

    let elem = ParamElement::with_value(profile, 0, Value::Bag(members)).unwrap();
    let wire = pack_element(&elem, &options).unwrap();
    assert_eq!(wire, "cfg.profile={retries[1]=0x1,retries[2]=0x2}");

    let back = unpack_element(&wire, &options).unwrap().element;
    let bag = back.value().unwrap().as_bag().unwrap();
    assert_eq!(bag.find_field_tagged(profile, 2, 2).unwrap().tag, 2);
}

#[test]
fn test_member_count_bounds() {
    let set = setup();
    let narrow = set.param_id(6);

    let one: parampack::ParamList = [member(set.param_id(3), narrow, 1, 1, Value::U8(1))]
        .into_iter()
        .collect();
    assert!(ParamElement::with_value(narrow, 0, Value::Bag(one)).is_ok());

    let two: parampack::ParamList = [
        member(set.param_id(3), narrow, 1, 1, Value::U8(1)),
        member(set.param_id(3), narrow, 1, 2, Value::U8(2)),
    ]
    .into_iter()
    .collect();
    assert!(ParamElement::with_value(narrow, 0, Value::Bag(two)).is_err());
}

#[test]
fn test_field_addressing_from_top_level() {
    let set = setup();
    let options = PackOptions::default();
    let profile = set.param_id(0);
    let timeout = set.param_id(2);

    let unpacked = unpack_element("cfg.profile%timeout=0x40", &options).unwrap();
    assert_eq!(unpacked.element.id, timeout);
    let f = unpacked.element.context.unwrap();
    assert_eq!((f.context, f.field_id), (profile, 1));
    assert_eq!(unpacked.element.value(), Some(&Value::U32(0x40)));

    // And the inverse: packing the same element reproduces the text.
    let wire = pack_element(&unpacked.element, &options).unwrap();
    assert_eq!(wire, "cfg.profile%timeout=0x40");
}

#[test]
fn test_unknown_field_rejected() {
    setup();
    let options = PackOptions::default();
    assert!(unpack_element("cfg.profile%nosuch=1", &options).is_err());
}

#[test]
fn test_child_addressing() {
    let set = setup();
    let options = PackOptions::default();
    let profile = set.param_id(0);
    let fine = set.param_id(1);

    // Hand-written wire form with a bare child name resolves through the
    // field parameter's set.
    let unpacked = unpack_element("cfg.profile%timeout(fine)[2]=0xa", &options).unwrap();
    assert_eq!(unpacked.element.id, fine);
    assert_eq!(unpacked.element.tag, 2);
    let f = unpacked.element.context.unwrap();
    assert_eq!((f.context, f.field_id), (profile, 1));
    assert_eq!(unpacked.element.value(), Some(&Value::U16(10)));

    // Packing embeds the child's full identifier; the result unpacks back
    // to the same element.
    let wire = pack_element(&unpacked.element, &options).unwrap();
    assert_eq!(wire, "cfg.profile%timeout(cfg.fine)[2]=0xa");
    assert_eq!(unpack_element(&wire, &options).unwrap(), unpacked);
}

#[test]
fn test_undeclared_child_rejected() {
    setup();
    let options = PackOptions::default();
    // `retries` is not a declared child of `timeout`.
    assert!(unpack_element("cfg.profile%timeout(retries)=1", &options).is_err());
}

#[test]
fn test_unpack_in_context_directly() {
    let set = setup();
    let options = PackOptions::default();
    let profile = set.param_id(0);

    let unpacked = unpack_element_in_context("retries=0x2", profile, &options).unwrap();
    assert_eq!(unpacked.element.id, set.param_id(3));
    assert_eq!(unpacked.element.context.unwrap().field_id, 2);

    // A field suffix is meaningless inside a context.
    assert!(unpack_element_in_context("retries%x=1", profile, &options).is_err());
    // Unknown field names fail.
    assert!(unpack_element_in_context("ghost=1", profile, &options).is_err());
}

#[test]
fn test_bag_value_stays_atomic_in_lists() {
    let set = setup();
    let options = PackOptions::default();
    let profile = set.param_id(0);

    let members: parampack::ParamList = [
        member(set.param_id(2), profile, 1, 0, Value::U32(1)),
        member(set.param_id(3), profile, 2, 0, Value::U8(2)),
    ]
    .into_iter()
    .collect();
    let bag_elem = ParamElement::with_value(profile, 0, Value::Bag(members)).unwrap();
    let plain = ParamElement::with_value(set.param_id(3), 0, Value::U8(9)).unwrap();

    let list: parampack::ParamList = [bag_elem, plain].into_iter().collect();
    let wire = parampack::pack_list(&list, &options).unwrap();
    // The bag's inner delimiters do not split the outer list.
    let back = parampack::unpack_list(&wire, &options).unwrap();
    assert_eq!(back, list);
}
