use super::MapDocument;

const DOCUMENT_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>VolunteerAtlas map</title>

  <!-- Leaflet 1.9.4 -->
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css" crossorigin="anonymous" />
  <script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js" crossorigin="anonymous"></script>

  <!-- Leaflet.markercluster 1.4.1 -->
  <link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@1.4.1/dist/MarkerCluster.css" />
  <link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@1.4.1/dist/MarkerCluster.Default.css" />
  <script src="https://unpkg.com/leaflet.markercluster@1.4.1/dist/leaflet.markercluster.js"></script>

  <!-- Leaflet.Locate 0.79.0 -->
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/leaflet.locatecontrol@0.79.0/dist/L.Control.Locate.min.css" />
  <script src="https://cdn.jsdelivr.net/npm/leaflet.locatecontrol@0.79.0/dist/L.Control.Locate.min.js"></script>

  <style>
    html, body { width: 100%; height: 100%; margin: 0; padding: 0; }
    #map { position: absolute; top: 0; bottom: 0; right: 0; left: 0; }
    .popup-frame { border: 0; }
  </style>
</head>
<body>
  <div id="map"></div>
  <script>
    const ATLAS = "#;

const DOCUMENT_SCRIPT: &str = r#";

    const map = L.map('map', {
      center: ATLAS.options.center,
      zoom: ATLAS.options.zoom_start,
      minZoom: ATLAS.options.min_zoom,
    });

    L.tileLayer(ATLAS.options.tile_url, {
      attribution: ATLAS.options.tile_attribution,
    }).addTo(map);
    L.control.scale().addTo(map);

    const overlays = {};
    ATLAS.layers.forEach(function (layer) {
      const cluster = L.markerClusterGroup({ showCoverageOnHover: false });

      layer.markers.forEach(function (marker) {
        const frame = document.createElement('iframe');
        frame.className = 'popup-frame';
        frame.srcdoc = marker.popup;
        frame.width = marker.popup_width;
        frame.height = marker.popup_height;

        L.circle([marker.lat, marker.lng], {
          radius: marker.radius,
          color: marker.color,
          fill: true,
          fillColor: marker.color,
        })
          .bindPopup(frame, { maxWidth: marker.popup_width + 20 })
          .addTo(cluster);
      });

      cluster.addTo(map);
      overlays[layer.name] = cluster;
    });

    L.control.layers(null, overlays, { collapsed: true }).addTo(map);

    L.control.locate({
      flyTo: true,
      keepCurrentZoomLevel: false,
      showPopup: true,
      returnToPrevBounds: true,
      locateOptions: { maxZoom: ATLAS.options.locate_max_zoom },
    }).addTo(map);
  </script>
</body>
</html>
"#;

impl MapDocument {
    /// Serializes the map into one standalone HTML page, suitable for an
    /// iframe `srcdoc`. Marker data is inlined as JSON.
    pub fn to_html(&self) -> Result<String, serde_json::Error> {
        // "</" inside a string literal would end the script element early.
        let data = serde_json::to_string(self)?.replace("</", "<\\/");

        let mut html = String::with_capacity(DOCUMENT_HEAD.len() + data.len() + DOCUMENT_SCRIPT.len());
        html.push_str(DOCUMENT_HEAD);
        html.push_str(&data);
        html.push_str(DOCUMENT_SCRIPT);
        Ok(html)
    }
}
