/// Section markers found in diagnostic result emails and the headings they become.
///
/// Markers are disjoint and none of them occurs inside a heading, so the
/// order of application does not change the output. If a marker ever
/// overlapped another entry's heading, the earlier entry would win.
pub const MARKER_TABLE: [(&str, &str); 8] = [
    ("ethernet_green Test", "# Ethernet Test"),
    ("flash_on_green PoE", "## PoE"),
    ("ll_link_green Link", "## Link"),
    ("ll_switch_black Switch", "## Switch"),
    ("ll_dhcp_green DHCP", "## DHCP"),
    ("ll_dns_black DNS", "## DNS"),
    ("ll_gateway_green Gateway", "## Gateway"),
    ("ll_www_green TCP", "## TCP"),
];
