use hostfold_core::{Inventory, aggregate, extract_hosts};

const WEB1: &str = r#"{"resources":[{"type":"ansible_host","instances":[{"attributes":{"name":"web1","groups":["webservers","prod"],"variables":{"env":"prod"}}}]}]}"#;

const FLEET: &str = r#"{
  "version": 4,
  "terraform_version": "1.6.0",
  "resources": [
    {
      "mode": "managed",
      "type": "aws_instance",
      "name": "web",
      "instances": [{"attributes": {"name": "i-0abc", "groups": ["ec2"]}}]
    },
    {
      "mode": "managed",
      "type": "ansible_host",
      "name": "web",
      "instances": [
        {"attributes": {"name": "web1", "groups": ["web", "prod"], "variables": {"ansible_user": "deploy"}}},
        {"attributes": {"name": "web2", "groups": ["web", "prod", 7], "variables": {"ansible_user": "deploy", "weight": 3}}}
      ]
    },
    {
      "mode": "managed",
      "type": "ansible_host",
      "name": "db",
      "instances": [
        {"attributes": {"name": "db1", "groups": ["db", "prod"]}},
        {"attributes": {"name": "web1", "groups": ["canary"], "variables": {"ansible_user": "root"}}},
        {"attributes": {"name": "bastion"}}
      ]
    }
  ]
}"#;

#[test]
fn test_single_host_round_trip() {
    let hosts = extract_hosts(WEB1.as_bytes()).unwrap();
    assert_eq!(hosts.len(), 1);
    assert_eq!(hosts[0].name(), "web1");
    assert_eq!(hosts[0].groups(), ["webservers", "prod"]);
    assert_eq!(hosts[0].variables()["env"], "prod");

    let inventory = Inventory::from_records(hosts);
    let groups = serde_json::to_value(inventory.groups()).unwrap();
    assert_eq!(
        groups,
        serde_json::json!({
            "webservers": {"hosts": ["web1"]},
            "prod": {"hosts": ["web1"]}
        })
    );
}

#[test]
fn test_fleet_document() {
    let inventory = Inventory::from_records(extract_hosts(FLEET.as_bytes()).unwrap());

    assert_eq!(inventory.hosts().len(), 5);
    assert!(inventory.groups().get("ec2").is_none());

    let prod: Vec<&str> = inventory.groups().get("prod").unwrap().hosts().collect();
    assert_eq!(prod, vec!["db1", "web1", "web2"]);
    assert!(inventory.groups().contains("canary", "web1"));
    assert!(inventory.groups().iter().all(|(_, m)| !m.contains("bastion")));

    let vars = inventory.host_vars();
    assert_eq!(vars["web1"]["ansible_user"], "root");
    assert!(!vars["web2"].contains_key("weight"));
    assert!(vars["bastion"].is_empty());
}

#[test]
fn test_aggregate_twice_equals_once() {
    let hosts = extract_hosts(FLEET.as_bytes()).unwrap();
    let once = aggregate(&hosts);
    let mut merged = aggregate(&hosts);
    merged.merge(&aggregate(&hosts));
    assert_eq!(once, merged);
}
