use city_core::{Building, City, CityError, Factory, Residential, ResourcePool, Street, Utility};

fn two_segment_city(money: i64) -> City {
    let mut city = City::new("Riverside", money);
    city.add_street(Street::new(1).with_segments([1, 2]));
    city
}

fn params(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Residential upgrade consumes materials once, then reports the shortfall
/// without aborting the pass.
#[test]
fn residential_upgrade_cycle() {
    let mut city = two_segment_city(100);
    assert_eq!(city.max_buildings(), 4);
    city.add_resource("wood", 10).unwrap();
    city.add_resource("stone", 5).unwrap();

    city.add_building("residential", "Home", &params(&["10"]), 0)
        .expect("residential should be added");
    assert_eq!(city.buildings()[0].capacity_effect(), 10);

    let report = city.upgrade_all_buildings().unwrap();
    assert!(report.is_clean());
    assert_eq!(city.resources().get("wood"), 0);
    assert_eq!(city.resources().get("stone"), 0);
    assert_eq!(city.buildings()[0].level(), 2);
    assert_eq!(city.money(), 120);
    assert_eq!(city.buildings()[0].capacity_effect(), 20);

    let report = city
        .upgrade_all_buildings()
        .expect("resource shortfall must not abort the pass");
    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, "Home");
    assert!(matches!(failures[0].1, CityError::InsufficientResource(_)));
    assert_eq!(city.money(), 120);
    assert_eq!(city.buildings()[0].level(), 2);
}

#[test]
fn unaffordable_park_is_rejected() {
    let mut city = two_segment_city(20);

    let err = city
        .add_building("park", "Green", &params(&["10", "30"]), 0)
        .unwrap_err();

    assert!(matches!(err, CityError::InsufficientFunds { needed: 30, available: 20 }));
    assert!(city.buildings().is_empty());
    assert_eq!(city.money(), 20);
}

#[test]
fn factory_round_converts_money_to_wood() {
    let mill = Building::new("Mill", 1, Factory::single("wood", 20, 30)).unwrap();
    let mut resources = ResourcePool::new();
    resources.add("wood", 0).unwrap();
    let mut money = 100;

    mill.as_factory()
        .unwrap()
        .produce(&mut resources, &mut money)
        .unwrap();

    assert_eq!(money, 70);
    assert_eq!(resources.get("wood"), 20);
}

#[test]
fn direct_insert_fails_exactly_at_capacity() {
    let mut city = two_segment_city(0);
    let template = Building::new("Hut", 1, Residential::new(3, Default::default(), 5)).unwrap();

    for _ in 0..city.max_buildings() {
        city.add_building_direct(template.clone()).unwrap();
    }
    assert_eq!(city.building_count(), city.max_buildings());
    assert_eq!(
        city.add_building_direct(template.clone()),
        Err(CityError::LimitExceeded { max: 4 })
    );
    assert_eq!(city.building_count(), 4);
}

#[test]
fn capacity_matches_formula_after_repeated_upgrades() {
    let mut city = City::new("Metro", 10_000);
    city.add_street(Street::new(3).with_segments(0..10));
    city.add_resource("wood", 1_000).unwrap();
    city.add_resource("stone", 1_000).unwrap();

    let cases: [(&str, Vec<String>, u32, i64); 5] = [
        ("residential", params(&["10", "1"]), 3, 10),
        ("utility", params(&["Water", "25.9", "2"]), 3, 25),
        ("park", params(&["8", "0"]), 2, 8),
        ("commercial", params(&["15", "1"]), 4, 15),
        ("factory", params(&["wood", "6", "10"]), 1, 6),
    ];
    for (type_id, p, _, _) in &cases {
        city.add_building(type_id, type_id, p, 0).unwrap();
    }
    let initial: Vec<u32> = city.buildings().iter().map(Building::level).collect();

    for n in 1..=4u32 {
        city.upgrade_all_buildings().unwrap();
        for (i, (type_id, _, max, base)) in cases.iter().enumerate() {
            let building = &city.buildings()[i];
            let expected = if *type_id == "factory" {
                *base
            } else {
                base * (initial[i] + n).min(*max) as i64
            };
            assert_eq!(building.capacity_effect(), expected, "{type_id} after {n}");
        }
    }
}

#[test]
fn copied_city_diverges() {
    let mut city = two_segment_city(200);
    city.add_building_direct(Building::new("Plant", 1, Utility::new("Power", 30.0, 50)).unwrap())
        .unwrap();

    let mut other = city.clone();
    other.set_money(500);
    other.upgrade_all_buildings().unwrap();

    assert_eq!(other.money(), 450);
    assert_eq!(other.total_capacity(), 60);
    assert_eq!(city.money(), 200);
    assert_eq!(city.total_capacity(), 30);
}
