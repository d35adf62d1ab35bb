//! Cisco IOS / IOS-XE configuration parser.
//!
//! Blocks end at the next unindented `interface`, `router`, `!` or `end`
//! line. Interfaces are up unless explicitly shut down.

use super::blocks::{keyword_delimited, Block};
use super::routing::{bgp_from_block, ospf_from_block};
use super::{description_value, extract_hostname, Dialect, DialectParser, ParseError};
use crate::models::{
    DeviceBuilder, DeviceKind, DeviceModel, InterfaceAddress, InterfaceRecord, InterfaceStatus,
    DHCP_SENTINEL,
};
use std::net::Ipv4Addr;

const BLOCK_TERMINATORS: &[&str] = &["interface", "router", "!", "end"];
const LOOPBACK_PREFIX: &str = "Loopback";

cached_regex!(model_regex, r"(?m)license udi pid\s+(\S+)");
cached_regex!(ip_address_regex, r"^ip address\s+(\S+)(?:\s+(\S+))?");
cached_regex!(
    channel_group_regex,
    r"^channel-group\s+(\d+)(?:\s+mode\s+(\S+))?"
);

pub struct CiscoIosParser;

impl DialectParser for CiscoIosParser {
    fn dialect(&self) -> Dialect {
        Dialect::CiscoIos
    }

    fn parse(&self, text: &str, filename: &str) -> Result<DeviceModel, ParseError> {
        let hostname = extract_hostname(text).ok_or_else(|| ParseError::MissingHostname {
            filename: filename.to_string(),
        })?;

        let mut device = DeviceBuilder::new(hostname, filename);
        device.default_kind(DeviceKind::Router);

        if let Some(c) = model_regex().captures(text) {
            device.model(&c[1]);
        }

        for block in keyword_delimited(text, "interface", BLOCK_TERMINATORS) {
            let record = parse_interface(&block);
            log::trace!("{hostname}: interface {} status={}", record.name, record.status);
            if record.name.starts_with(LOOPBACK_PREFIX) {
                device.add_loopback(record);
            } else {
                device.add_interface(record);
            }
        }

        if let Some(bgp) = keyword_delimited(text, "router bgp", BLOCK_TERMINATORS)
            .first()
            .and_then(bgp_from_block)
        {
            device.bgp(bgp);
        }
        if let Some(ospf) = keyword_delimited(text, "router ospf", BLOCK_TERMINATORS)
            .first()
            .and_then(ospf_from_block)
        {
            device.ospf(ospf);
        }

        Ok(device.build())
    }
}

fn parse_interface(block: &Block) -> InterfaceRecord {
    let mut record = InterfaceRecord::new(block.first_token(), InterfaceStatus::Up);

    // Must be decided before any address line is looked at: a stale
    // address below `no ip address` is never extracted.
    let no_ip = block.lines().any(|line| line.starts_with("no ip address"));
    let mut shutdown = false;

    for line in block.lines() {
        if line.starts_with("no ip address") {
            continue;
        }
        if let Some(c) = ip_address_regex().captures(line) {
            if !no_ip && record.address.is_none() {
                record.address = Some(parse_address(&c[1], c.get(2).map(|m| m.as_str())));
                continue;
            }
        } else if line == "shutdown" {
            shutdown = true;
            continue;
        } else if let Some(description) = description_value(line) {
            if record.description.is_none() {
                record.description = Some(description.to_string());
                continue;
            }
        } else if line == "negotiation auto" {
            record.negotiation = Some("auto".to_string());
            continue;
        } else if let Some(c) = channel_group_regex().captures(line) {
            record.lag_member = true;
            record.lag_id = Some(c[1].to_string());
            record.aggregation_protocol = c
                .get(2)
                .and_then(|mode| channel_group_protocol(mode.as_str()))
                .map(str::to_string);
            continue;
        }
        record.other_config.push(line.to_string());
    }

    record.status = if no_ip {
        InterfaceStatus::NoIp
    } else if shutdown {
        InterfaceStatus::Down
    } else {
        InterfaceStatus::Up
    };
    record
}

/// Negotiation protocol implied by a `channel-group N mode <mode>` token.
///
/// `mode on` is a static bundle with no protocol.
fn channel_group_protocol(mode: &str) -> Option<&'static str> {
    match mode {
        "active" | "passive" => Some("LACP"),
        "desirable" | "auto" => Some("PAgP"),
        _ => None,
    }
}

/// `ip address <address> <mask>`; unparseable tokens degrade to raw text.
fn parse_address(address: &str, mask: Option<&str>) -> InterfaceAddress {
    if address == DHCP_SENTINEL {
        return InterfaceAddress::Dhcp;
    }
    let parsed = (
        address.parse::<Ipv4Addr>(),
        mask.map(|m| m.parse::<Ipv4Addr>()),
    );
    match parsed {
        (Ok(address), Some(Ok(mask))) => InterfaceAddress::Static { address, mask },
        _ => {
            log::debug!("Keeping unparsed address '{address}' mask {mask:?}");
            InterfaceAddress::Raw {
                text: address.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const R1: &str = "\
version 17.3
! Cisco IOS XE Software
hostname R1
!
license udi pid CSR1000V sn 9ABCDEF
!
interface Loopback0
 ip address 1.1.1.1 255.255.255.255
!
interface GigabitEthernet1
 description to R2 Gi1
 ip address 10.0.12.1 255.255.255.252
 negotiation auto
 ip ospf cost 5
!
interface GigabitEthernet2
 no ip address
 shutdown
 negotiation auto
!
interface GigabitEthernet3
 ip address dhcp
!
interface GigabitEthernet4
 ip address 10.0.99.300 255.255.255.0
 shutdown
!
interface GigabitEthernet5
 channel-group 10 mode active
!
router ospf 1
 router-id 1.1.1.1
 network 10.0.12.0 0.0.0.3 area 0
!
router bgp 65001
 neighbor 10.0.12.2 remote-as 65002
 redistribute connected
!
end
";

    fn parse(text: &str) -> DeviceModel {
        CiscoIosParser.parse(text, "r1.conf").unwrap()
    }

    #[test]
    fn test_parse_device_header() {
        let device = parse(R1);
        assert_eq!(device.hostname(), "R1");
        assert_eq!(device.filename(), "r1.conf");
        assert_eq!(device.model(), "CSR1000V");
        assert_eq!(device.default_kind(), Some(DeviceKind::Router));
    }

    #[test]
    fn test_missing_hostname_is_failure() {
        let err = CiscoIosParser
            .parse("interface GigabitEthernet1\n ip address 10.0.0.1 255.0.0.0\n", "x.conf")
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingHostname {
                filename: "x.conf".to_string()
            }
        );
    }

    #[test]
    fn test_loopbacks_are_classified_separately() {
        let device = parse(R1);
        assert!(device.interface("Loopback0").is_none());
        let lo = device.loopback("Loopback0").unwrap();
        assert_eq!(lo.address.as_ref().unwrap().address_text(), "1.1.1.1");
        assert_eq!(device.interfaces().len(), 5);
    }

    #[test]
    fn test_static_interface() {
        let device = parse(R1);
        let gi1 = device.interface("GigabitEthernet1").unwrap();
        assert_eq!(gi1.status, InterfaceStatus::Up);
        assert_eq!(gi1.description.as_deref(), Some("to R2 Gi1"));
        assert_eq!(
            gi1.address,
            Some(InterfaceAddress::Static {
                address: Ipv4Addr::new(10, 0, 12, 1),
                mask: Ipv4Addr::new(255, 255, 255, 252),
            })
        );
        assert_eq!(gi1.negotiation.as_deref(), Some("auto"));
        assert_eq!(gi1.other_config, vec!["ip ospf cost 5"]);
    }

    #[test]
    fn test_no_ip_address_takes_precedence() {
        let device = parse(R1);
        let gi2 = device.interface("GigabitEthernet2").unwrap();
        assert_eq!(gi2.status, InterfaceStatus::NoIp);
        assert_eq!(gi2.address, None);
    }

    #[test]
    fn test_no_ip_address_ignores_later_address_line() {
        let text = "hostname R9\ninterface GigabitEthernet1\n no ip address\n ip address 10.1.1.1 255.255.255.0\n!\n";
        let device = parse(text);
        let gi1 = device.interface("GigabitEthernet1").unwrap();
        assert_eq!(gi1.status, InterfaceStatus::NoIp);
        assert_eq!(gi1.address, None);
        assert_eq!(gi1.network(), None);
        assert_eq!(gi1.other_config, vec!["ip address 10.1.1.1 255.255.255.0"]);
    }

    #[test]
    fn test_dhcp_and_malformed_addresses_degrade() {
        let device = parse(R1);
        let gi3 = device.interface("GigabitEthernet3").unwrap();
        assert_eq!(gi3.address, Some(InterfaceAddress::Dhcp));
        assert_eq!(gi3.status, InterfaceStatus::Up);

        let gi4 = device.interface("GigabitEthernet4").unwrap();
        assert_eq!(
            gi4.address,
            Some(InterfaceAddress::Raw {
                text: "10.0.99.300".to_string()
            })
        );
        assert_eq!(gi4.status, InterfaceStatus::Down);
    }

    #[test]
    fn test_channel_group_membership() {
        let device = parse(R1);
        let gi5 = device.interface("GigabitEthernet5").unwrap();
        assert!(gi5.lag_member);
        assert_eq!(gi5.lag_id.as_deref(), Some("10"));
        assert_eq!(gi5.aggregation_protocol.as_deref(), Some("LACP"));
    }

    #[test]
    fn test_channel_group_mode_sets_protocol() {
        let text = "\
hostname R9
interface GigabitEthernet1
 channel-group 1 mode on
interface GigabitEthernet2
 channel-group 2 mode desirable
interface GigabitEthernet3
 channel-group 3
end
";
        let device = parse(text);
        let protocol = |name: &str| {
            device
                .interface(name)
                .and_then(|i| i.aggregation_protocol.clone())
        };
        assert_eq!(protocol("GigabitEthernet1"), None);
        assert_eq!(protocol("GigabitEthernet2"), Some("PAgP".to_string()));
        assert_eq!(protocol("GigabitEthernet3"), None);
        assert!(device.interface("GigabitEthernet1").unwrap().lag_member);
    }

    #[test]
    fn test_routing_protocols() {
        let device = parse(R1);
        let bgp = device.bgp().unwrap();
        assert_eq!(bgp.asn, 65001);
        assert_eq!(bgp.neighbors[0].address, "10.0.12.2");
        assert_eq!(bgp.neighbors[0].remote_asn, 65002);
        assert!(bgp.redistribute.contains("connected"));

        let ospf = device.ospf().unwrap();
        assert_eq!(ospf.process_id, 1);
        assert_eq!(ospf.router_id.as_deref(), Some("1.1.1.1"));
        assert_eq!(ospf.areas(), &["0".to_string()]);
    }

    #[test]
    fn test_no_routing() {
        let device = parse("hostname SW9\ninterface GigabitEthernet1\n ip address 10.0.0.1 255.255.255.0\n");
        assert!(device.bgp().is_none());
        assert!(device.ospf().is_none());
        assert_eq!(device.model(), "");
    }
}
