/// Static facts about the sales platform shown in the welcome banner.
pub struct PlatformInfo {
    pub name: &'static str,
    pub subtitle: &'static str,
    pub location: &'static str,
    pub version: &'static str,
    pub support: &'static str,
    pub hotline: &'static str,
}

pub const PLATFORM: PlatformInfo = PlatformInfo {
    name: "智播农链销售平台",
    subtitle: "从种到销，AI驱动农业全流程数智升级",
    location: "保定阜平",
    version: concat!("v", env!("CARGO_PKG_VERSION")),
    support: "技术支持：AI农业科技团队",
    hotline: "400-123-4567",
};

impl PlatformInfo {
    pub fn banner(&self) -> String {
        format!(
            "🌾 {} - AI客服\n{}\n版本: {} | 服务地区: {}\n{} | 客服热线: {}",
            self.name, self.subtitle, self.version, self.location, self.support, self.hotline
        )
    }
}
