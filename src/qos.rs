use rustdds::{policy::*, Duration, QosPolicies, QosPolicyBuilder};

lazy_static! {
  /// The ROS2 default QoS profile for Publishers and Subscriptions:
  /// reliable, volatile, keep last 10.
  ///
  /// See `rmw_qos_profile_default` in rmw/qos_profiles.h
  pub static ref DEFAULT_QOS: QosPolicies = QosPolicyBuilder::new()
    .durability(Durability::Volatile)
    .deadline(Deadline(Duration::INFINITE))
    .ownership(Ownership::Shared)
    .reliability(Reliability::Reliable {
      max_blocking_time: Duration::from_millis(100)
    })
    .history(History::KeepLast { depth: 10 })
    .lifespan(Lifespan {
      duration: Duration::INFINITE
    })
    .build();
}
