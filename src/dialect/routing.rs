//! Routing protocol extraction shared by the dialect parsers.

use super::blocks::Block;
use crate::models::{BgpNeighbor, BgpRecord, OspfNetwork, OspfRecord};

cached_regex!(
    neighbor_regex,
    r"^neighbor\s+(\S+)\s+remote-as\s+(\d+)"
);
cached_regex!(redistribute_regex, r"^redistribute\s+(\S+)");
cached_regex!(router_id_regex, r"^(?:bgp\s+)?router-id\s+(\S+)");
cached_regex!(
    ospf_network_regex,
    r"^network\s+(\S+)\s+(\S+)\s+area\s+(\S+)"
);

/// BGP record from a `router bgp <asn>` block.
///
/// Returns `None` when the header does not carry a numeric ASN.
pub(crate) fn bgp_from_block(block: &Block) -> Option<BgpRecord> {
    let asn = match block.first_token().parse::<u32>() {
        Ok(asn) => asn,
        Err(_) => {
            log::warn!("Ignoring BGP block with invalid ASN '{}'", block.argument);
            return None;
        }
    };
    let mut bgp = BgpRecord::new(asn);

    for line in block.lines() {
        if let Some(c) = neighbor_regex().captures(line) {
            match c[2].parse::<u32>() {
                Ok(remote_asn) => bgp.neighbors.push(BgpNeighbor {
                    address: c[1].to_string(),
                    remote_asn,
                }),
                Err(_) => log::debug!("Ignoring neighbor with invalid remote-as: {line}"),
            }
        } else if let Some(c) = redistribute_regex().captures(line) {
            bgp.redistribute.insert(c[1].to_string());
        }
    }
    log::debug!(
        "BGP AS{} with {} neighbors, redistribute {:?}",
        bgp.asn,
        bgp.neighbors.len(),
        bgp.redistribute
    );
    Some(bgp)
}

/// OSPF record from a `router ospf <pid>` block: router id and every
/// `network <addr> <wildcard> area <area>` statement.
pub(crate) fn ospf_from_block(block: &Block) -> Option<OspfRecord> {
    let process_id = match block.first_token().parse::<u32>() {
        Ok(pid) => pid,
        Err(_) => {
            log::warn!("Ignoring OSPF block with invalid process id '{}'", block.argument);
            return None;
        }
    };
    let mut ospf = OspfRecord::new(process_id);

    for line in block.lines() {
        if let Some(c) = router_id_regex().captures(line) {
            ospf.router_id.get_or_insert_with(|| c[1].to_string());
        } else if let Some(c) = ospf_network_regex().captures(line) {
            ospf.add_network(OspfNetwork {
                network: c[1].to_string(),
                wildcard: c[2].to_string(),
                area: c[3].to_string(),
            });
        }
    }
    Some(ospf)
}
