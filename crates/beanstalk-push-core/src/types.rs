//! Region table and deployment target types.

use std::fmt;
use std::str::FromStr;

use crate::error::UnknownRegion;

/// A region that hosts a git deployment endpoint.
///
/// The set of regions is closed: anything outside [`Region::ALL`] is rejected
/// with [`UnknownRegion`] when parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Region {
    /// EU (Ireland).
    EuWest1,
    /// US East (N. Virginia).
    UsEast1,
    /// US West (N. California).
    UsWest1,
    /// US West (Oregon).
    UsWest2,
    /// Asia Pacific (Tokyo).
    ApNortheast1,
    /// Asia Pacific (Singapore).
    ApSoutheast1,
    /// Asia Pacific (Sydney).
    ApSoutheast2,
    /// South America (Sao Paulo).
    SaEast1,
}

impl Region {
    /// Every region in the table.
    pub const ALL: [Self; 8] = [
        Self::EuWest1,
        Self::UsEast1,
        Self::UsWest1,
        Self::UsWest2,
        Self::ApNortheast1,
        Self::ApSoutheast1,
        Self::ApSoutheast2,
        Self::SaEast1,
    ];

    /// The region identifier, e.g. `eu-west-1`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EuWest1 => "eu-west-1",
            Self::UsEast1 => "us-east-1",
            Self::UsWest1 => "us-west-1",
            Self::UsWest2 => "us-west-2",
            Self::ApNortheast1 => "ap-northeast-1",
            Self::ApSoutheast1 => "ap-southeast-1",
            Self::ApSoutheast2 => "ap-southeast-2",
            Self::SaEast1 => "sa-east-1",
        }
    }

    /// The git endpoint serving this region.
    #[must_use]
    pub const fn endpoint(self) -> ServiceEndpoint {
        let host = match self {
            Self::EuWest1 => "git.elasticbeanstalk.eu-west-1.amazonaws.com",
            Self::UsEast1 => "git.elasticbeanstalk.us-east-1.amazonaws.com",
            Self::UsWest1 => "git.elasticbeanstalk.us-west-1.amazonaws.com",
            Self::UsWest2 => "git.elasticbeanstalk.us-west-2.amazonaws.com",
            Self::ApNortheast1 => "git.elasticbeanstalk.ap-northeast-1.amazonaws.com",
            Self::ApSoutheast1 => "git.elasticbeanstalk.ap-southeast-1.amazonaws.com",
            Self::ApSoutheast2 => "git.elasticbeanstalk.ap-southeast-2.amazonaws.com",
            Self::SaEast1 => "git.elasticbeanstalk.sa-east-1.amazonaws.com",
        };
        ServiceEndpoint(host)
    }
}

impl FromStr for Region {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|region| region.as_str() == s)
            .ok_or_else(|| UnknownRegion(s.to_owned()))
    }
}

impl TryFrom<String> for Region {
    type Error = UnknownRegion;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.as_str().to_owned()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hostname of a regional git deployment endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceEndpoint(&'static str);

impl ServiceEndpoint {
    /// Get the hostname as a string slice.
    #[must_use]
    pub const fn host(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ServiceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The application environment a push is deployed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentTarget {
    application: String,
    environment: Option<String>,
    region: Region,
}

impl DeploymentTarget {
    /// Create a target from a region identifier.
    ///
    /// An empty environment is treated as absent.
    ///
    /// # Errors
    /// Returns [`UnknownRegion`] if the region is not in the table.
    pub fn new(
        application: impl Into<String>,
        environment: Option<String>,
        region: &str,
    ) -> Result<Self, UnknownRegion> {
        let region = region.parse()?;
        Ok(Self::with_region(application, environment, region))
    }

    /// Create a target for an already-resolved region.
    #[must_use]
    pub fn with_region(
        application: impl Into<String>,
        environment: Option<String>,
        region: Region,
    ) -> Self {
        Self {
            application: application.into(),
            environment: environment.filter(|env| !env.is_empty()),
            region,
        }
    }

    /// The application name.
    #[must_use]
    pub fn application(&self) -> &str {
        &self.application
    }

    /// The environment name, if one was given.
    #[must_use]
    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    /// The target region.
    #[must_use]
    pub fn region(&self) -> Region {
        self.region
    }

    /// The endpoint the region resolves to.
    #[must_use]
    pub fn endpoint(&self) -> ServiceEndpoint {
        self.region.endpoint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_resolve_every_region_to_documented_host() {
        for region in Region::ALL {
            let host = region.endpoint().host();
            assert!(!host.is_empty());
            assert_eq!(
                host,
                format!("git.elasticbeanstalk.{}.amazonaws.com", region.as_str())
            );
        }
    }

    #[test]
    fn test_should_parse_every_region_identifier() {
        for region in Region::ALL {
            assert_eq!(region.as_str().parse::<Region>().unwrap(), region);
        }
    }

    #[test]
    fn test_should_reject_unknown_region() {
        for name in ["eu-central-1", "", "US-EAST-1", "us-east-1 "] {
            let result = name.parse::<Region>();
            assert_eq!(result, Err(UnknownRegion(name.to_owned())));
        }
    }

    #[test]
    fn test_should_build_target_and_drop_empty_environment() {
        let target = DeploymentTarget::new("myapp", Some(String::new()), "us-west-2").unwrap();
        assert_eq!(target.application(), "myapp");
        assert_eq!(target.environment(), None);
        assert_eq!(target.region(), Region::UsWest2);
        assert_eq!(
            target.endpoint().host(),
            "git.elasticbeanstalk.us-west-2.amazonaws.com"
        );
    }

    #[test]
    fn test_should_fail_target_with_unknown_region() {
        let result = DeploymentTarget::new("myapp", Some("prod".to_owned()), "mars-north-1");
        assert_eq!(result, Err(UnknownRegion("mars-north-1".to_owned())));
    }

    #[test]
    fn test_should_display_region_and_endpoint() {
        assert_eq!(Region::SaEast1.to_string(), "sa-east-1");
        assert_eq!(
            Region::SaEast1.endpoint().to_string(),
            "git.elasticbeanstalk.sa-east-1.amazonaws.com"
        );
    }
}
