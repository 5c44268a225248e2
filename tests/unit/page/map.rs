use super::*;

const ADDRESS: &str = "123 Smart Street, Tech City, TC 12345";

fn embed() -> EmbedMapProvider {
    EmbedMapProvider {
        base_url: "https://maps.example/embed".to_owned(),
        query: "Tech City".to_owned(),
    }
}

#[test]
fn keyed_provider_yields_widget_only() {
    let view = MapView::resolve(&embed(), Some("abc-123"), ADDRESS);
    assert_eq!(
        view,
        MapView::Widget(MapWidget {
            embed_url: "https://maps.example/embed?key=abc-123&q=Tech+City".to_owned()
        })
    );
    assert!(!view.is_fallback());
}

#[test]
fn missing_key_falls_back_to_address() {
    let view = MapView::resolve(&embed(), None, ADDRESS);
    assert_eq!(
        view,
        MapView::StaticAddress {
            address: ADDRESS.to_owned()
        }
    );
    assert!(view.is_fallback());
}

#[test]
fn provider_failure_falls_back() {
    assert!(MapView::resolve(&OfflineMapProvider, Some("k"), ADDRESS).is_fallback());
    assert_eq!(
        embed().load(Some("bad key")),
        Err(MapLoadError::Unavailable("malformed key 'bad key'".to_owned()))
    );
}
