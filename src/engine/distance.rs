// ==========================================
// 物流订单分配系统 - 大圆距离纯函数库
// ==========================================
// 职责: haversine 大圆距离计算
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================

use crate::domain::order::Coordinates;

/// 地球半径 (米), 与源系统常量逐位一致
pub const EARTH_RADIUS_M: f64 = 6_371_000.000_000_01;

/// 计算两坐标间的 haversine 大圆距离
///
/// # 公式
/// - a = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlon/2)
/// - c = 2·atan2(√a, √(1−a))
/// - distance_km = R·c / 1000
///
/// 经纬度按度输入,计算前转换为弧度。
/// 使用 f64 双精度即可满足 1e-9 km 的容差要求,
/// 不需要源系统的高精度十进制中间步骤。
///
/// # 参数
/// - from: 起点坐标 (度)
/// - to: 终点坐标 (度)
///
/// # 返回
/// - f64: 距离 (公里)
pub fn haversine_km(from: &Coordinates, to: &Coordinates) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lon1 = from.longitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let lon2 = to.longitude.to_radians();

    let delta_lat = lat2 - lat1;
    let delta_lon = lon2 - lon1;

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE_KM: f64 = 1e-9;

    #[test]
    fn test_zero_distance() {
        let p = Coordinates::new(40.4168, -3.7038);
        assert!(haversine_km(&p, &p).abs() < TOLERANCE_KM);
    }

    #[test]
    fn test_one_degree_longitude_at_equator() {
        // 赤道上经度一度 ≈ 111.19 km
        let origin = Coordinates::new(0.0, 0.0);
        let east = Coordinates::new(0.0, 1.0);
        let d = haversine_km(&origin, &east);
        let expected = EARTH_RADIUS_M * 1.0_f64.to_radians() / 1000.0;
        assert!((d - expected).abs() < TOLERANCE_KM);
        assert!((d - 111.19).abs() < 0.01);
    }

    #[test]
    fn test_symmetry() {
        let a = Coordinates::new(40.4168, -3.7038); // 马德里
        let b = Coordinates::new(41.3874, 2.1686); // 巴塞罗那
        let d_ab = haversine_km(&a, &b);
        let d_ba = haversine_km(&b, &a);
        assert!((d_ab - d_ba).abs() < TOLERANCE_KM);
        // 马德里-巴塞罗那直线距离约 505 km
        assert!(d_ab > 490.0 && d_ab < 520.0);
    }

    #[test]
    fn test_antipodal_distance() {
        // 对跖点距离 ≈ 半个地球周长 π·R
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(0.0, 180.0);
        let d = haversine_km(&a, &b);
        let expected = std::f64::consts::PI * EARTH_RADIUS_M / 1000.0;
        assert!((d - expected).abs() < 1e-6);
    }
}
