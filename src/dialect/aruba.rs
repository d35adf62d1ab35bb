//! Aruba AOS-CX configuration parser.
//!
//! Block bodies are indented by four spaces. Interfaces are down unless a
//! `no shutdown` line is present, and addresses use `address/prefix`.

use super::blocks::{indentation_delimited, Block};
use super::routing::{bgp_from_block, ospf_from_block};
use super::{description_value, extract_hostname, Dialect, DialectParser, ParseError};
use crate::models::{
    prefix_to_mask, DeviceBuilder, DeviceKind, DeviceModel, InterfaceAddress, InterfaceRecord,
    InterfaceStatus, OspfInterfaceArea, OspfRecord,
};
use std::net::Ipv4Addr;

const BODY_INDENT: usize = 4;
const LOOPBACK_PREFIX: &str = "loopback";
const LAG_PREFIX: &str = "lag";
const LAG_PROTOCOL: &str = "LACP";

cached_regex!(version_regex, r"!Version AOS-CX (.+)");
cached_regex!(ip_address_regex, r"^ip address\s+(\S+/\d+)");
cached_regex!(lag_regex, r"^lag\s+(\d+)");
cached_regex!(interface_ospf_regex, r"^ip ospf\s+(\d+)\s+area\s+(\S+)");
cached_regex!(area_regex, r"^area\s+(\S+)");

pub struct ArubaCxParser;

impl DialectParser for ArubaCxParser {
    fn dialect(&self) -> Dialect {
        Dialect::ArubaCx
    }

    fn parse(&self, text: &str, filename: &str) -> Result<DeviceModel, ParseError> {
        let hostname = extract_hostname(text).ok_or_else(|| ParseError::MissingHostname {
            filename: filename.to_string(),
        })?;

        let mut device = DeviceBuilder::new(hostname, filename);
        device.default_kind(DeviceKind::Switch);

        if let Some(c) = version_regex().captures(text) {
            device.model(format!("AOS-CX {}", c[1].trim()));
        }

        let mut ospf_assignments = Vec::new();
        for block in indentation_delimited(text, "interface", BODY_INDENT) {
            let (record, assignment) = parse_interface(&block);
            log::trace!("{hostname}: interface {} status={}", record.name, record.status);
            ospf_assignments.extend(assignment);
            if record.name.starts_with(LOOPBACK_PREFIX) {
                device.add_loopback(record);
            } else {
                device.add_interface(record);
            }
        }

        if let Some(ospf) = indentation_delimited(text, "router ospf", BODY_INDENT)
            .first()
            .and_then(parse_ospf)
        {
            device.ospf(ospf);
        }
        if !ospf_assignments.is_empty() {
            let process_id = ospf_assignments[0].process_id;
            device
                .ospf_or_insert_with(|| OspfRecord::new(process_id))
                .merge_interface_areas(ospf_assignments);
        }

        if let Some(bgp) = indentation_delimited(text, "router bgp", BODY_INDENT)
            .first()
            .and_then(bgp_from_block)
        {
            device.bgp(bgp);
        }

        Ok(device.build())
    }
}

fn parse_interface(block: &Block) -> (InterfaceRecord, Option<OspfInterfaceArea>) {
    let name = block.argument;
    let mut record = InterfaceRecord::new(name, InterfaceStatus::Down);
    let mut ospf_area = None;
    let mut dhcp = false;

    for line in block.lines() {
        if line == "no shutdown" {
            record.status = InterfaceStatus::Up;
        } else if line.starts_with("ip dhcp") {
            dhcp = true;
        } else if let Some(c) = ip_address_regex().captures(line) {
            if record.address.is_none() {
                record.address = Some(parse_prefix_address(&c[1]));
            }
        } else if let Some(c) = lag_regex().captures(line) {
            record.lag_member = true;
            record.lag_id = Some(c[1].to_string());
        } else if let Some(c) = interface_ospf_regex().captures(line) {
            match c[1].parse::<u32>() {
                Ok(process_id) => {
                    ospf_area = Some(OspfInterfaceArea {
                        interface: name.to_string(),
                        process_id,
                        area: c[2].to_string(),
                    })
                }
                Err(_) => record.other_config.push(line.to_string()),
            }
        } else if let Some(description) = description_value(line) {
            record.description = Some(description.to_string());
        } else {
            record.other_config.push(line.to_string());
        }
    }

    // DHCP wins over any static address in the same block
    if dhcp {
        record.address = Some(InterfaceAddress::Dhcp);
    }
    if name.starts_with(LAG_PREFIX) {
        record.aggregation_protocol = Some(LAG_PROTOCOL.to_string());
    }
    (record, ospf_area)
}

/// `address/prefix` converted to an address and dotted mask.
fn parse_prefix_address(cidr: &str) -> InterfaceAddress {
    let parsed = cidr.split_once('/').and_then(|(address, prefix)| {
        let address = address.parse::<Ipv4Addr>().ok()?;
        let mask = prefix.parse::<u8>().ok().and_then(|p| prefix_to_mask(p).ok())?;
        Some(InterfaceAddress::Static { address, mask })
    });
    parsed.unwrap_or_else(|| {
        log::debug!("Keeping unparsed address '{cidr}'");
        InterfaceAddress::Raw {
            text: cidr.to_string(),
        }
    })
}

/// Router id, network statements and every `area` line of the OSPF block.
fn parse_ospf(block: &Block) -> Option<OspfRecord> {
    let mut ospf = ospf_from_block(block)?;
    for line in block.lines() {
        if let Some(c) = area_regex().captures(line) {
            ospf.add_area(&c[1]);
        }
    }
    Some(ospf)
}
